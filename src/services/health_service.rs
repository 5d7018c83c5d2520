use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the storage backend and report overall service health.
///
/// The route always answers 200; degradation is reported in the body so the
/// frontend can show a banner while storage reconnects.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let storage_reachable = match state.order_store().await {
        Some(store) => match store.health_check().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "storage ping failed during health check");
                false
            }
        },
        None => {
            warn!("health check while storage is disconnected");
            false
        }
    };

    if storage_reachable {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}
