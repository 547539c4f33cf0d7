// src/chain/accounts.rs
//
// Fixed identities and chain used by the simulator. The accounts are the
// local dev node's well-known default accounts, pre-funded at genesis.

use ethers::prelude::*;
use std::str::FromStr;

use crate::models::{Account, ChainDescriptor, NativeCurrency};

pub const LOCALHOST_CHAIN_ID: &str = "0x539"; // 1337
pub const LOCALHOST_RPC_URL: &str = "http://127.0.0.1:8545";

#[derive(Debug, Clone, Copy)]
pub struct TestAccount {
    pub address: &'static str,
    pub private_key: &'static str,
}

pub const TEST_ACCOUNTS: [TestAccount; 3] = [
    TestAccount {
        address: "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        private_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    },
    TestAccount {
        address: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        private_key: "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    },
    TestAccount {
        address: "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
        private_key: "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    },
];

pub fn localhost_chain() -> ChainDescriptor {
    ChainDescriptor {
        chain_id: LOCALHOST_CHAIN_ID.to_string(),
        chain_name: "Localhost".to_string(),
        rpc_urls: vec![LOCALHOST_RPC_URL.to_string()],
        native_currency: NativeCurrency {
            name: "ETH".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        },
    }
}

/// Resolve a pool entry into an [`Account`], checking that the key really
/// belongs to the advertised address.
pub fn load_account(index: usize) -> Result<Account, Box<dyn std::error::Error + Send + Sync>> {
    let entry = TEST_ACCOUNTS
        .get(index)
        .ok_or_else(|| format!("no test account at index {}", index))?;

    let address = Address::from_str(entry.address)?;
    let derived = LocalWallet::from_str(entry.private_key.trim_start_matches("0x"))?.address();
    if derived != address {
        return Err(format!(
            "private key for test account {} derives {:?}, expected {:?}",
            index, derived, address
        )
        .into());
    }

    Ok(Account {
        address,
        private_key: entry.private_key.to_string(),
    })
}
