use std::env;
use url::Url;

use crate::chain::accounts::{localhost_chain, LOCALHOST_RPC_URL, TEST_ACCOUNTS};

#[derive(Debug, Clone)]
pub struct Config {
    pub node_rpc_url: String,
    pub test_account_index: usize,
    pub chain_id: String,

    // HTTP bridge
    pub port: u16,
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        let chain = localhost_chain();
        Config {
            node_rpc_url: chain
                .rpc_urls
                .into_iter()
                .next()
                .unwrap_or_else(|| LOCALHOST_RPC_URL.to_string()),
            test_account_index: 0,
            chain_id: chain.chain_id,
            port: 8000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let node_rpc_url = env::var("NODE_RPC_URL").unwrap_or(defaults.node_rpc_url);
        Url::parse(&node_rpc_url)
            .map_err(|e| format!("NODE_RPC_URL is not a valid URL ({}): {}", node_rpc_url, e))?;

        let test_account_index: usize = env::var("TEST_ACCOUNT_INDEX")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| "TEST_ACCOUNT_INDEX must be a non-negative integer")?;
        if test_account_index >= TEST_ACCOUNTS.len() {
            return Err(format!(
                "TEST_ACCOUNT_INDEX {} out of range (pool has {} accounts)",
                test_account_index,
                TEST_ACCOUNTS.len()
            )
            .into());
        }

        Ok(Config {
            node_rpc_url,
            test_account_index,
            chain_id: env::var("CHAIN_ID").unwrap_or(defaults.chain_id),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
        })
    }
}
