use tokio::sync::broadcast;

use crate::dto::sse::ScopedEvent;

/// Simple broadcast hub wrapper used by the SSE services.
///
/// A single channel carries events for every dashboard and every tracked
/// buzzer; subscribers filter by [`ScopedEvent`] scope fields.
pub struct SseHub {
    sender: broadcast::Sender<ScopedEvent>,
}

impl SseHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ScopedEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: ScopedEvent) {
        let _ = self.sender.send(event);
    }
}
