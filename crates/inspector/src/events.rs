//! Event Bus - outbound protocol events
//!
//! Domains publish synchronously and never wait for a reader. Each
//! connected transport holds its own receiver.

use tokio::sync::broadcast;

use crate::protocol::InspectorEvent;

pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<InspectorEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event
    pub fn publish(&self, event: InspectorEvent) {
        tracing::trace!(method = %event.method, "publishing event");
        let _ = self.tx.send(event); // No subscribers is fine
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<InspectorEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
