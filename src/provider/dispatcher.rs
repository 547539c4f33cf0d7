// src/provider/dispatcher.rs
//
// The injected-provider request surface. Every method is answered one of
// three ways: locally from provider state, with a fixed placeholder, or by
// forwarding to the backing node unchanged.

use serde_json::{json, Value};

use crate::chain::rpc_forwarder::RpcForwarder;
use crate::models::{Account, ChainDescriptor, JsonRpcPayload, JsonRpcResponse, RequestArguments};
use crate::provider::error::ProviderError;
use crate::provider::events::{EventBus, Listener, SubscriptionId, CHAIN_CHANGED};
use crate::provider::state::ProviderState;

/// Byte length of the placeholder signature.
pub const PLACEHOLDER_SIGNATURE_LEN: usize = 65;

/// Methods relayed verbatim to the backing node.
pub const FORWARDED_METHODS: &[&str] = &[
    "eth_sendTransaction",
    "eth_call",
    "eth_estimateGas",
    "eth_getBalance",
    "eth_getCode",
    "eth_getTransactionCount",
    "eth_getTransactionReceipt",
    "eth_blockNumber",
    "eth_getBlockByNumber",
    "eth_getLogs",
];

/// How a method is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    ChainId,
    NetVersion,
    Accounts,
    Sign,
    Forward,
    SwitchChain,
    AddChain,
    Unsupported,
}

pub fn classify(method: &str) -> Handling {
    match method {
        "eth_chainId" => Handling::ChainId,
        "net_version" => Handling::NetVersion,
        "eth_accounts" | "eth_requestAccounts" => Handling::Accounts,
        "personal_sign" | "eth_signTypedData_v4" => Handling::Sign,
        "wallet_switchEthereumChain" => Handling::SwitchChain,
        "wallet_addEthereumChain" => Handling::AddChain,
        m if FORWARDED_METHODS.contains(&m) => Handling::Forward,
        _ => Handling::Unsupported,
    }
}

/// `0x` followed by 65 zero bytes.
///
/// This is a test double, not a signature: it is not derived from the
/// message or any key and proves nothing about authenticity. Only flows
/// that check "signing returned something" can rely on it.
pub fn placeholder_signature() -> String {
    format!("0x{}", hex::encode([0u8; PLACEHOLDER_SIGNATURE_LEN]))
}

/// Simulated browser-extension wallet.
pub struct MockProvider {
    state: ProviderState,
    events: EventBus,
    forwarder: RpcForwarder,
}

impl MockProvider {
    pub fn new(account: Account, chain_id: String, forwarder: RpcForwarder) -> Self {
        Self {
            state: ProviderState::new(account, chain_id),
            events: EventBus::new(),
            forwarder,
        }
    }

    pub fn is_meta_mask(&self) -> bool {
        true
    }

    pub fn selected_address(&self) -> String {
        self.state.account().address_hex()
    }

    pub fn chain_id(&self) -> String {
        self.state.chain_id()
    }

    pub fn network_version(&self) -> String {
        self.state.network_version()
    }

    pub fn account(&self) -> &Account {
        self.state.account()
    }

    pub fn rpc_url(&self) -> &str {
        self.forwarder.rpc_url()
    }

    pub fn on(&self, event: &str, listener: Listener) -> SubscriptionId {
        self.events.on(event, listener)
    }

    pub fn remove_listener(&self, event: &str, id: SubscriptionId) -> bool {
        self.events.remove_listener(event, id)
    }

    pub fn emit(&self, event: &str, args: &[Value]) -> Result<usize, ProviderError> {
        self.events.emit(event, args)
    }

    /// Single entry point. Unknown methods resolve to `null` with a warning.
    pub async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        let RequestArguments { method, params } = args;
        log::debug!("[MockProvider] Request: {} {}", method, params);

        match classify(&method) {
            Handling::ChainId => Ok(Value::String(self.chain_id())),
            Handling::NetVersion => Ok(Value::String(self.network_version())),
            Handling::Accounts => Ok(json!([self.selected_address()])),
            Handling::Sign => Ok(Value::String(placeholder_signature())),
            Handling::Forward => self.forwarder.forward(&method, &params).await,
            Handling::SwitchChain => self.switch_chain(&method, &params),
            Handling::AddChain => {
                // Accepted without registering the chain anywhere.
                match params.get(0).cloned().map(serde_json::from_value::<ChainDescriptor>) {
                    Some(Ok(chain)) => {
                        log::debug!("[MockProvider] Accepting chain {} ({})", chain.chain_name, chain.chain_id)
                    }
                    _ => log::debug!("[MockProvider] Accepting chain {}", params),
                }
                Ok(Value::Null)
            }
            Handling::Unsupported => {
                log::warn!("[MockProvider] Unhandled method: {}", method);
                Ok(Value::Null)
            }
        }
    }

    fn switch_chain(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let chain_id = params
            .get(0)
            .and_then(|p| p.get("chainId"))
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::MalformedParams {
                method: method.to_string(),
                reason: "expected [{ chainId: string }]".to_string(),
            })?
            .to_string();

        self.state.set_chain_id(chain_id.clone());
        log::info!("[MockProvider] Switched to chain {}", chain_id);
        self.events.emit(CHAIN_CHANGED, &[Value::String(chain_id)])?;
        Ok(Value::Null)
    }

    /// Legacy `send(method, params)`.
    pub async fn send(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.request(RequestArguments::new(method, params)).await
    }

    /// Legacy `sendAsync(payload, callback)`: answers a JSON-RPC envelope
    /// echoing the payload id.
    pub async fn send_async(&self, payload: JsonRpcPayload) -> Result<JsonRpcResponse, ProviderError> {
        let JsonRpcPayload { id, method, params, .. } = payload;
        let result = self.request(RequestArguments::new(method, params)).await?;
        Ok(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        })
    }

    /// Legacy `enable()`, same as `eth_requestAccounts`.
    pub async fn enable(&self) -> Result<Value, ProviderError> {
        self.request(RequestArguments::new("eth_requestAccounts", Value::Null))
            .await
    }
}
