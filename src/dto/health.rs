use serde::Serialize;
use utoipa::ToSchema;

/// Payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status, `ok` or `degraded`.
    pub status: &'static str,
    /// Whether the storage backend answered the last ping.
    pub storage_reachable: bool,
}

impl HealthResponse {
    /// Storage is connected and answering.
    pub fn ok() -> Self {
        Self {
            status: "ok",
            storage_reachable: true,
        }
    }

    /// Running without storage or with a failing ping.
    pub fn degraded() -> Self {
        Self {
            status: "degraded",
            storage_reachable: false,
        }
    }
}
