use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::BuzzerStatus;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Serialized data field.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }

    /// Build an event carrying a plain-text data field.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }
}

#[derive(Clone, Debug)]
/// An event scoped to one buzzer, broadcast through the shared hub.
///
/// SSE subscribers filter on the scope: the dashboard stream matches on
/// `business_id`, the public stream on `public_token`.
pub struct ScopedEvent {
    /// Business the buzzer belongs to.
    pub business_id: Uuid,
    /// Public token of the buzzer the event concerns.
    pub public_token: String,
    /// The payload forwarded to subscribers.
    pub event: ServerEvent,
}

#[derive(Debug, Serialize, ToSchema)]
/// Sent on every open stream when storage availability changes.
pub struct SystemDegradedEvent {
    /// True while the service is running without storage.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when staff create a buzzer.
pub struct BuzzerCreatedEvent {
    /// Identifier of the new buzzer.
    pub buzzer_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when staff adjust a buzzer's ETA.
pub struct BuzzerTimeAdjustedEvent {
    /// Identifier of the adjusted buzzer.
    pub buzzer_id: Uuid,
    /// New ETA in minutes.
    pub eta: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a buzzer changes lifecycle status.
pub struct BuzzerStatusChangedEvent {
    /// Identifier of the buzzer.
    pub buzzer_id: Uuid,
    /// Status after the transition.
    pub status: BuzzerStatus,
}
