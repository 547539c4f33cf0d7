// src/discovery.rs
//
// Makes an injected provider reachable two ways: the legacy single global
// slot (`window.ethereum`) and the multi-provider announcement event
// (`eip6963:announceProvider`). Both point at the same provider instance.

use std::sync::{Arc, Mutex, RwLock};

use crate::models::ProviderInfo;
use crate::provider::MockProvider;

pub const ANNOUNCE_EVENT: &str = "eip6963:announceProvider";

pub const MOCK_WALLET_UUID: &str = "mock-wallet-uuid";
pub const MOCK_WALLET_NAME: &str = "Mock Wallet";
pub const MOCK_WALLET_ICON: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\"/>";

pub fn mock_wallet_info() -> ProviderInfo {
    ProviderInfo {
        uuid: MOCK_WALLET_UUID.to_string(),
        name: MOCK_WALLET_NAME.to_string(),
        icon: MOCK_WALLET_ICON.to_string(),
    }
}

/// Payload of one discovery announcement.
#[derive(Clone)]
pub struct ProviderDetail {
    pub info: ProviderInfo,
    pub provider: Arc<MockProvider>,
}

pub type AnnouncementListener = Arc<dyn Fn(&ProviderDetail) + Send + Sync>;

/// The page the provider is injected into, reduced to what discovery needs.
#[derive(Default)]
pub struct HostPage {
    ethereum: RwLock<Option<Arc<MockProvider>>>,
    announced: Mutex<Vec<ProviderDetail>>,
    listeners: Mutex<Vec<AnnouncementListener>>,
}

impl HostPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single well-known provider slot.
    pub fn ethereum(&self) -> Option<Arc<MockProvider>> {
        self.ethereum
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_ethereum(&self, provider: Arc<MockProvider>) {
        *self
            .ethereum
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(provider);
    }

    /// Listen for announcements made from now on.
    pub fn add_announce_listener(&self, listener: AnnouncementListener) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }

    /// Record `detail` and deliver it to every current listener.
    pub fn announce(&self, detail: ProviderDetail) {
        self.announced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(detail.clone());

        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        log::debug!(
            "Dispatching {} for '{}' to {} listener(s)",
            ANNOUNCE_EVENT,
            detail.info.name,
            listeners.len()
        );
        for listener in listeners {
            listener(&detail);
        }
    }

    /// Every announcement made on this page, oldest first.
    pub fn announcements(&self) -> Vec<ProviderDetail> {
        self.announced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Install `provider` into `page`: fill the global slot, then announce once.
pub fn inject(page: &HostPage, provider: Arc<MockProvider>) {
    page.set_ethereum(provider.clone());
    let address = provider.selected_address();
    page.announce(ProviderDetail {
        info: mock_wallet_info(),
        provider,
    });
    log::info!("[MockProvider] Injected with account: {}", address);
}
