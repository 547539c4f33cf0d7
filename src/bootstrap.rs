use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::chain::{accounts, rpc_forwarder::RpcForwarder};
use crate::config::Config;
use crate::discovery::{inject, HostPage};
use crate::models::ProviderEvent;
use crate::provider::events::{ACCOUNTS_CHANGED, CHAIN_CHANGED};
use crate::provider::MockProvider;

/// Buffered events per slow `/api/v1/events` subscriber.
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct AppState {
    pub page: HostPage,
    pub provider: Arc<MockProvider>,
    pub events: broadcast::Sender<ProviderEvent>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let account = accounts::load_account(config.test_account_index)?;
        let forwarder = RpcForwarder::new(config.node_rpc_url.clone());
        let provider = Arc::new(MockProvider::new(account, config.chain_id.clone(), forwarder));

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        for name in [CHAIN_CHANGED, ACCOUNTS_CHANGED] {
            let tx = events.clone();
            provider.on(
                name,
                Arc::new(move |args: &[Value]| -> anyhow::Result<()> {
                    // No receivers connected is not a failure.
                    let _ = tx.send(ProviderEvent {
                        event: name.to_string(),
                        args: args.to_vec(),
                    });
                    Ok(())
                }),
            );
        }

        let page = HostPage::new();
        inject(&page, provider.clone());

        Ok(AppState {
            page,
            provider,
            events,
        })
    }
}
