use ethers::types::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A wallet identity. The private key is carried for bookkeeping only and
/// is never used to sign anything.
#[derive(Debug, Clone)]
pub struct Account {
    pub address: Address,
    pub private_key: String,
}

impl Account {
    /// `0x`-prefixed, lower-case hex.
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address.as_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Shape of the `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
}

/// Arguments of a single `request()` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RequestArguments {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a Value,
}

fn default_error_code() -> i64 {
    crate::provider::error::INTERNAL_ERROR_CODE
}

fn default_jsonrpc_version() -> String {
    "2.0".to_string()
}

/// Nodes are not always strict: a missing `code` falls back to -32603.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(default = "default_error_code")]
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default = "default_jsonrpc_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

/// Legacy `sendAsync` payload: a full JSON-RPC request whose id is echoed back.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcPayload {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Metadata carried by a multi-provider discovery announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub uuid: String,
    pub name: String,
    pub icon: String,
}

/// A provider event as relayed to out-of-process observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEvent {
    pub event: String,
    pub args: Vec<Value>,
}
