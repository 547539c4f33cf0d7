use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{JsonRpcRequest, JsonRpcResponse};
use crate::provider::error::ProviderError;

/// Relays JSON-RPC calls to the backing node. One attempt per call, no
/// timeout, no retries.
pub struct RpcForwarder {
    client: Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl RpcForwarder {
    pub fn new(rpc_url: String) -> Self {
        // Seeded from the wall clock so ids stay distinguishable across
        // forwarders created in the same test run.
        let seed = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self {
            client: Client::new(),
            rpc_url,
            next_id: AtomicU64::new(seed),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Forward `method` with `params` unchanged and hand back the raw
    /// `result` member.
    pub async fn forward(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let empty = Value::Array(Vec::new());
        let params = if params.is_null() { &empty } else { params };

        let envelope = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_request_id(),
            method,
            params,
        };
        log::debug!("Forwarding {} (id {}) to {}", method, envelope.id, self.rpc_url);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                log::error!("Backing node unreachable for {}: {}", method, e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Transport(format!(
                "invalid JSON-RPC response (HTTP {}) for {}: {}",
                status, method, e
            ))
        })?;

        if let Some(error) = decoded.error {
            log::error!("Backing node rejected {}: {}", method, error.message);
            return Err(ProviderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(decoded.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarder_creation() {
        let forwarder = RpcForwarder::new("http://127.0.0.1:8545".to_string());
        assert_eq!(forwarder.rpc_url(), "http://127.0.0.1:8545");
    }

    #[test]
    fn test_request_ids_are_unique_and_increasing() {
        let forwarder = RpcForwarder::new("http://127.0.0.1:8545".to_string());
        let first = forwarder.next_request_id();
        let second = forwarder.next_request_id();
        assert!(second > first);
        // Wall-clock seeded, not a zero-based counter
        assert!(first > 1_600_000_000_000);
    }

    #[test]
    fn test_envelope_serialization() {
        let params = serde_json::json!(["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266", "latest"]);
        let envelope = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 42,
            method: "eth_getBalance",
            params: &params,
        };

        let json = serde_json::to_value(&envelope).expect("envelope serializes");
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 42);
        assert_eq!(json["method"], "eth_getBalance");
        assert_eq!(json["params"][1], "latest");
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
            listener.local_addr().expect("local addr").port()
        };
        let forwarder = RpcForwarder::new(format!("http://127.0.0.1:{}", port));
        let result = forwarder.forward("eth_blockNumber", &Value::Null).await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }
}
