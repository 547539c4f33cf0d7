// tests/common/mod.rs
// ===================================
// A stand-in backing node: a tiny rocket server speaking just enough
// JSON-RPC for the forwarding tests, plus helpers to build providers.

#![allow(dead_code)]

use rocket::serde::json::Json;
use rocket::{post, routes, State};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wallet_provider_sim::chain::accounts::{load_account, LOCALHOST_CHAIN_ID};
use wallet_provider_sim::chain::rpc_forwarder::RpcForwarder;
use wallet_provider_sim::provider::MockProvider;

/// 10000 ETH in wei.
pub const FUNDED_BALANCE_HEX: &str = "0x21e19e0c9bab2400000";
pub const REVERT_MESSAGE: &str = "execution reverted: caller is not a member";
pub const LOOSE_ERROR_MESSAGE: &str = "boom";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

/// Every envelope the mock node received, in arrival order.
#[derive(Default)]
pub struct NodeLog {
    pub calls: Mutex<Vec<Value>>,
}

impl NodeLog {
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[post("/", data = "<body>")]
async fn node_rpc(body: Json<Value>, log: &State<Arc<NodeLog>>) -> Json<Value> {
    let body = body.into_inner();
    log.calls.lock().unwrap().push(body.clone());

    let id = body["id"].clone();
    let reply = match body["method"].as_str().unwrap_or_default() {
        "eth_getBalance" => json!({ "jsonrpc": "2.0", "id": id, "result": FUNDED_BALANCE_HEX }),
        "eth_blockNumber" => {
            // Slow enough that concurrent calls overlap
            rocket::tokio::time::sleep(Duration::from_millis(50)).await;
            json!({ "jsonrpc": "2.0", "id": id, "result": "0x2a" })
        }
        "eth_sendTransaction" => json!({ "jsonrpc": "2.0", "id": id, "result": TX_HASH }),
        "eth_getTransactionReceipt" => json!({ "jsonrpc": "2.0", "id": id, "result": null }),
        "eth_getCode" => json!({ "jsonrpc": "2.0", "id": id, "result": "0x" }),
        "eth_call" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": 3, "message": REVERT_MESSAGE, "data": "0x08c379a0" }
        }),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "Method not found" }
        }),
    };
    Json(reply)
}

/// Echoes the method and params back as the result, for every method.
#[post("/echo", data = "<body>")]
fn node_echo(body: Json<Value>) -> Json<Value> {
    let body = body.into_inner();
    Json(json!({
        "jsonrpc": "2.0",
        "id": body["id"],
        "result": { "method": body["method"], "params": body["params"] }
    }))
}

/// Loosely formed replies: no `jsonrpc` on success, no `code` on errors.
#[post("/loose", data = "<body>")]
fn node_loose(body: Json<Value>) -> Json<Value> {
    let body = body.into_inner();
    match body["method"].as_str().unwrap_or_default() {
        "eth_blockNumber" => Json(json!({ "id": body["id"], "result": "0x2a" })),
        _ => Json(json!({ "jsonrpc": "2.0", "id": body["id"], "error": { "message": LOOSE_ERROR_MESSAGE } })),
    }
}

/// A localhost port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local addr").port()
}

pub fn unreachable_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

/// Launch the mock node and wait until it accepts connections. Besides
/// `/`, it serves `/echo` and `/loose`.
pub async fn spawn_mock_node() -> (String, Arc<NodeLog>) {
    let port = free_port();
    let log = Arc::new(NodeLog::default());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "127.0.0.1"))
        .merge(("log_level", "off"))
        .merge(("shutdown.ctrlc", false));
    let server = rocket::custom(figment)
        .manage(log.clone())
        .mount("/", routes![node_rpc, node_echo, node_loose]);
    tokio::spawn(server.launch());

    for _ in 0..100 {
        if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    (format!("http://127.0.0.1:{}", port), log)
}

pub fn provider_for(rpc_url: String) -> Arc<MockProvider> {
    Arc::new(MockProvider::new(
        load_account(0).expect("default account"),
        LOCALHOST_CHAIN_ID.to_string(),
        RpcForwarder::new(rpc_url),
    ))
}
