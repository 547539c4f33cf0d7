pub mod accounts;
pub mod rpc_forwarder;
