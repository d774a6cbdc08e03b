//! Lifecycle notifications.
//!
//! The [`Workshop`](crate::Workshop) publishes an [`Event`] after each
//! committed change that other parties may care about. Delivery is
//! best-effort: publishing never fails the operation that triggered it.

use jiff::Timestamp;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::Result;

/// A product was created (payload: the product).
pub const PRODUCT_CREATED: &str = "product_created";
/// A step was completed (payload: the cascade).
pub const STEP_COMPLETED: &str = "step_completed";
/// A product reached finalized status (payload: the product).
pub const PRODUCT_FINALIZED: &str = "product_finalized";

/// Notification published after a committed change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// One of [`PRODUCT_CREATED`], [`STEP_COMPLETED`], [`PRODUCT_FINALIZED`]
    pub name: String,
    /// JSON rendering of the affected entity
    pub payload: Value,
    /// When the event was published
    pub published_at: Timestamp,
}

impl Event {
    /// Builds an event from any serializable payload.
    ///
    /// # Errors
    ///
    /// * `ShopError::Serialization` - When the payload has no JSON form
    pub fn new(name: &str, payload: &impl Serialize) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            payload: serde_json::to_value(payload)?,
            published_at: Timestamp::now(),
        })
    }
}

/// Sink for lifecycle notifications.
pub trait NotificationEmitter: Send + Sync {
    /// Publishes an event. Must not block and must not fail the caller.
    fn publish(&self, event: &Event);
}

/// Emitter that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl NotificationEmitter for NoopEmitter {
    fn publish(&self, _event: &Event) {}
}

/// Fan-out emitter backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<Event>,
}

impl BroadcastEmitter {
    /// Create an emitter whose subscribers may lag by up to `capacity`
    /// events before losing the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(256)
    }
}

impl NotificationEmitter for BroadcastEmitter {
    fn publish(&self, event: &Event) {
        // No subscribers is not an error
        if self.sender.send(event.clone()).is_err() {
            debug!("Dropped event '{}': no subscribers", event.name);
        }
    }
}
