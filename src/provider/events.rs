// src/provider/events.rs
//
// In-process publish/subscribe for provider lifecycle events. Subscribers
// are held per event name in registration order and are addressed by the
// opaque SubscriptionId handed out at subscribe time.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::provider::error::ProviderError;

pub const CHAIN_CHANGED: &str = "chainChanged";
pub const ACCOUNTS_CHANGED: &str = "accountsChanged";

/// Subscriber callback. Receives every argument passed to `emit`.
pub type Listener = Arc<dyn Fn(&[Value]) -> anyhow::Result<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    by_event: HashMap<String, Vec<(SubscriptionId, Listener)>>,
}

#[derive(Default)]
pub struct EventBus {
    inner: Mutex<Subscribers>,
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, Subscribers> {
        // A listener panicking mid-registration leaves the map intact.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `listener` under `event`. Registering the same listener
    /// handle twice for one event returns the existing subscription.
    pub fn on(&self, event: &str, listener: Listener) -> SubscriptionId {
        let mut subs = self.subscribers();
        if let Some(existing) = subs
            .by_event
            .get(event)
            .and_then(|list| list.iter().find(|(_, l)| same_listener(l, &listener)))
        {
            return existing.0;
        }

        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.by_event
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    /// Returns false when `id` was not subscribed to `event`.
    pub fn remove_listener(&self, event: &str, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers();
        let Some(list) = subs.by_event.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|(sub_id, _)| *sub_id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            subs.by_event.remove(event);
        }
        removed
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.subscribers().by_event.get(event).map_or(0, Vec::len)
    }

    /// Deliver `args` to every subscriber of `event` in registration order.
    /// Stops at, and returns, the first subscriber failure.
    pub fn emit(&self, event: &str, args: &[Value]) -> Result<usize, ProviderError> {
        // Snapshot so listeners may (un)subscribe while being called.
        let listeners: Vec<Listener> = match self.subscribers().by_event.get(event) {
            Some(list) => list.iter().map(|(_, l)| l.clone()).collect(),
            None => return Ok(0),
        };

        for listener in &listeners {
            listener(args).map_err(|source| ProviderError::Listener {
                event: event.to_string(),
                source,
            })?;
        }
        Ok(listeners.len())
    }
}
