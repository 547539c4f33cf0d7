use std::sync::RwLock;

use crate::models::Account;

/// Mutable record owned by one provider instance. The account never
/// changes; the chain id changes only through a chain-switch request.
pub struct ProviderState {
    account: Account,
    chain_id: RwLock<String>,
}

impl ProviderState {
    pub fn new(account: Account, chain_id: String) -> Self {
        Self {
            account,
            chain_id: RwLock::new(chain_id),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn chain_id(&self) -> String {
        self.chain_id
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_chain_id(&self, chain_id: String) {
        *self
            .chain_id
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = chain_id;
    }

    /// Decimal form of the chain id, as `net_version` reports it. Chain ids
    /// that are not hex quantities are reported unchanged.
    pub fn network_version(&self) -> String {
        let chain_id = self.chain_id();
        let digits = chain_id
            .strip_prefix("0x")
            .or_else(|| chain_id.strip_prefix("0X"))
            .unwrap_or(&chain_id);
        match u64::from_str_radix(digits, 16) {
            Ok(n) => n.to_string(),
            Err(_) => chain_id,
        }
    }
}
