use axum::{Json, Router, extract::State, routing::{get, post}};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::{AppError, ServiceError},
    routes::auth::CurrentUser,
    state::SharedState,
};

/// Operator-only routes, mounted when `DEBUG_ROUTES` is enabled.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/debug/clear-demo-buzzers", post(clear_demo_buzzers))
        .route("/debug/storage-check", get(storage_check))
}

/// Result of a demo reset.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearDemoResponse {
    /// How many buzzers were removed.
    pub deleted: u64,
}

/// Outcome of an on-demand storage probe.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageCheckResponse {
    /// Whether the ping round-trip succeeded.
    pub reachable: bool,
}

/// Wipe every buzzer of the configured demo business.
#[utoipa::path(
    post,
    path = "/debug/clear-demo-buzzers",
    tag = "debug",
    responses(
        (status = 200, description = "Demo buzzers removed", body = ClearDemoResponse),
        (status = 404, description = "No demo business configured")
    )
)]
pub async fn clear_demo_buzzers(
    State(state): State<SharedState>,
    _current: CurrentUser,
) -> Result<Json<ClearDemoResponse>, AppError> {
    let Some(business_id) = state.config().demo_business_id else {
        return Err(AppError::NotFound("no demo business configured".into()));
    };

    let store = state.require_order_store().await?;
    let deleted = store
        .delete_buzzers_for_business(business_id)
        .await
        .map_err(ServiceError::from)?;
    info!(%business_id, deleted, "cleared demo buzzers");
    Ok(Json(ClearDemoResponse { deleted }))
}

/// Probe the storage backend with a single ping.
#[utoipa::path(
    get,
    path = "/debug/storage-check",
    tag = "debug",
    responses((status = 200, description = "Probe result", body = StorageCheckResponse))
)]
pub async fn storage_check(
    State(state): State<SharedState>,
    _current: CurrentUser,
) -> Json<StorageCheckResponse> {
    let reachable = match state.order_store().await {
        Some(store) => store.health_check().await.is_ok(),
        None => false,
    };
    Json(StorageCheckResponse { reachable })
}
