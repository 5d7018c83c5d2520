use std::convert::Infallible;

use axum::{
    Router,
    extract::{Path, State},
    response::sse::Sse,
    routing::get,
};
use futures::Stream;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    routes::auth::CurrentUser,
    services::{
        authz::ensure_staff,
        sse_service::{self, StreamScope},
    },
    state::SharedState,
};

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/sse/dashboard/{business_id}", get(dashboard_stream))
        .route("/sse/buzzers/{token}", get(buzzer_stream))
}

#[utoipa::path(
    get,
    path = "/sse/dashboard/{business_id}",
    tag = "sse",
    params(("business_id" = Uuid, Path, description = "Business whose buzzers are observed")),
    responses((status = 200, description = "Dashboard SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream buzzer events for one business to its staff dashboard.
pub async fn dashboard_stream(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(business_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>>, AppError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, current.user.id, business_id).await?;

    info!(%business_id, "new dashboard SSE connection");
    Ok(sse_service::open_stream(
        &state,
        StreamScope::Dashboard { business_id },
    ))
}

#[utoipa::path(
    get,
    path = "/sse/buzzers/{token}",
    tag = "sse",
    params(("token" = String, Path, description = "Public tracking token")),
    responses((status = 200, description = "Single-buzzer SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream events for one buzzer to its customer tracking page.
pub async fn buzzer_stream(
    State(state): State<SharedState>,
    Path(token): Path<String>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    info!("new public buzzer SSE connection");
    sse_service::open_stream(
        &state,
        StreamScope::Buzzer {
            public_token: token,
        },
    )
}
