//! Fan-out of derived events to attached subscribers.
//!
//! The hub owns an explicit registry of subscriber channels. Attaching
//! queues a full snapshot before any live event; publishing serializes the
//! envelope once and fans it out, silently dropping any subscriber whose
//! channel has closed. Attach/detach interleave freely with the ticking
//! producer.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use crate::events::SharedState;
use crate::protocol::Event;

/// Identifies one attached subscriber.
pub type SubscriberId = u64;

#[derive(Default)]
struct Registry {
    next_id: SubscriberId,
    subscribers: HashMap<SubscriberId, mpsc::UnboundedSender<String>>,
}

/// Maintains the live subscriber set and distributes serialized envelopes.
pub struct BroadcastHub {
    state: SharedState,
    registry: Mutex<Registry>,
}

impl BroadcastHub {
    pub fn new(state: SharedState) -> Self {
        Self { state, registry: Mutex::new(Registry::default()) }
    }

    /// Attach a subscriber. The returned channel yields serialized
    /// envelopes, starting with the `connection_status` snapshot.
    pub async fn attach(&self) -> (SubscriberId, mpsc::UnboundedReceiver<String>) {
        let snapshot = Event::ConnectionStatus(self.state.read().await.snapshot());

        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(text) = snapshot.to_json() {
            let _ = tx.send(text);
        }

        let mut registry = self.registry.lock().await;
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.insert(id, tx);
        debug!(id, total = registry.subscribers.len(), "Subscriber attached");
        (id, rx)
    }

    /// Remove a subscriber. Removing an unknown id is a no-op.
    pub async fn detach(&self, id: SubscriberId) {
        let mut registry = self.registry.lock().await;
        if registry.subscribers.remove(&id).is_some() {
            debug!(id, total = registry.subscribers.len(), "Subscriber detached");
        }
    }

    /// Serialize an event once and send it to every open subscriber.
    /// Subscribers whose channel has closed are dropped from the set.
    pub async fn publish(&self, event: &Event) {
        let text = match event.to_json() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to serialize event, dropping it");
                return;
            }
        };

        let mut registry = self.registry.lock().await;
        registry.subscribers.retain(|id, tx| {
            let open = tx.send(text.clone()).is_ok();
            if !open {
                debug!(id, "Subscriber channel closed, dropping");
            }
            open
        });
    }

    /// Number of currently attached subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.registry.lock().await.subscribers.len()
    }

    /// Close every subscriber channel. Part of shutdown: called after the
    /// polling ticker has stopped, before the listener is released.
    pub async fn close_all(&self) {
        let mut registry = self.registry.lock().await;
        registry.subscribers.clear();
    }
}
