use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::buzzer::{
        AdjustTimeRequest, BuzzerSummary, CreateBuzzerRequest, CreateBuzzerResponse,
    },
    error::AppError,
    routes::auth::CurrentUser,
    services::buzzer_service,
    state::SharedState,
};

/// Routes handling the staff-facing buzzer lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/businesses/{id}/buzzers",
            post(create_buzzer).get(list_open_buzzers),
        )
        .route(
            "/businesses/{id}/buzzers/{buzzer_id}/adjust-time",
            post(adjust_time),
        )
        .route("/businesses/{id}/buzzers/{buzzer_id}/ready", post(mark_ready))
        .route(
            "/businesses/{id}/buzzers/{buzzer_id}/picked-up",
            post(mark_picked_up),
        )
        .route("/businesses/{id}/buzzers/{buzzer_id}/cancel", post(cancel))
}

/// Start a new buzzer for an order.
#[utoipa::path(
    post,
    path = "/businesses/{id}/buzzers",
    tag = "buzzer",
    params(("id" = Uuid, Path, description = "Owning business")),
    request_body = CreateBuzzerRequest,
    responses(
        (status = 200, description = "Buzzer started", body = CreateBuzzerResponse),
        (status = 403, description = "Requester is not staff of this business")
    )
)]
pub async fn create_buzzer(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<CreateBuzzerRequest>>,
) -> Result<Json<CreateBuzzerResponse>, AppError> {
    let response = buzzer_service::create_buzzer(&state, &current.user, id, payload).await?;
    Ok(Json(response))
}

/// List active and ready buzzers, newest first.
#[utoipa::path(
    get,
    path = "/businesses/{id}/buzzers",
    tag = "buzzer",
    params(("id" = Uuid, Path, description = "Owning business")),
    responses(
        (status = 200, description = "Open buzzers", body = [BuzzerSummary]),
        (status = 403, description = "Requester is not staff of this business")
    )
)]
pub async fn list_open_buzzers(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BuzzerSummary>>, AppError> {
    let buzzers = buzzer_service::list_open_buzzers(&state, &current.user, id).await?;
    Ok(Json(buzzers))
}

/// Add or remove time from a running buzzer.
#[utoipa::path(
    post,
    path = "/businesses/{id}/buzzers/{buzzer_id}/adjust-time",
    tag = "buzzer",
    params(
        ("id" = Uuid, Path, description = "Owning business"),
        ("buzzer_id" = Uuid, Path, description = "Buzzer to adjust")
    ),
    request_body = AdjustTimeRequest,
    responses(
        (status = 200, description = "ETA adjusted", body = BuzzerSummary),
        (status = 409, description = "Buzzer is not running")
    )
)]
pub async fn adjust_time(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path((id, buzzer_id)): Path<(Uuid, Uuid)>,
    Valid(Json(payload)): Valid<Json<AdjustTimeRequest>>,
) -> Result<Json<BuzzerSummary>, AppError> {
    let summary =
        buzzer_service::adjust_time(&state, &current.user, id, buzzer_id, payload).await?;
    Ok(Json(summary))
}

/// Mark an order ready for pickup.
#[utoipa::path(
    post,
    path = "/businesses/{id}/buzzers/{buzzer_id}/ready",
    tag = "buzzer",
    params(
        ("id" = Uuid, Path, description = "Owning business"),
        ("buzzer_id" = Uuid, Path, description = "Target buzzer")
    ),
    responses(
        (status = 200, description = "Buzzer marked ready", body = BuzzerSummary),
        (status = 409, description = "Lifecycle does not allow the transition")
    )
)]
pub async fn mark_ready(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path((id, buzzer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BuzzerSummary>, AppError> {
    let summary = buzzer_service::mark_ready(&state, &current.user, id, buzzer_id).await?;
    Ok(Json(summary))
}

/// Record that the customer collected the order.
#[utoipa::path(
    post,
    path = "/businesses/{id}/buzzers/{buzzer_id}/picked-up",
    tag = "buzzer",
    params(
        ("id" = Uuid, Path, description = "Owning business"),
        ("buzzer_id" = Uuid, Path, description = "Target buzzer")
    ),
    responses(
        (status = 200, description = "Pickup recorded", body = BuzzerSummary),
        (status = 409, description = "Lifecycle does not allow the transition")
    )
)]
pub async fn mark_picked_up(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path((id, buzzer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BuzzerSummary>, AppError> {
    let summary = buzzer_service::mark_picked_up(&state, &current.user, id, buzzer_id).await?;
    Ok(Json(summary))
}

/// Cancel a running order.
#[utoipa::path(
    post,
    path = "/businesses/{id}/buzzers/{buzzer_id}/cancel",
    tag = "buzzer",
    params(
        ("id" = Uuid, Path, description = "Owning business"),
        ("buzzer_id" = Uuid, Path, description = "Target buzzer")
    ),
    responses(
        (status = 200, description = "Buzzer canceled", body = BuzzerSummary),
        (status = 409, description = "Lifecycle does not allow the transition")
    )
)]
pub async fn cancel(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path((id, buzzer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BuzzerSummary>, AppError> {
    let summary = buzzer_service::cancel(&state, &current.user, id, buzzer_id).await?;
    Ok(Json(summary))
}
