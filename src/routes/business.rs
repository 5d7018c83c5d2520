use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::business::{BusinessSummary, CreateBusinessRequest, UpdateBusinessRequest},
    error::AppError,
    routes::auth::CurrentUser,
    services::business_service,
    state::SharedState,
};

/// Routes handling business registration and settings.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/businesses", post(create_business))
        .route("/businesses/mine", get(my_business))
        .route("/businesses/{id}", patch(update_business))
}

/// Register a new business owned by the requester.
#[utoipa::path(
    post,
    path = "/businesses",
    tag = "business",
    request_body = CreateBusinessRequest,
    responses(
        (status = 200, description = "Business registered", body = BusinessSummary),
        (status = 409, description = "Slug already taken or requester already has a business")
    )
)]
pub async fn create_business(
    State(state): State<SharedState>,
    current: CurrentUser,
    Valid(Json(payload)): Valid<Json<CreateBusinessRequest>>,
) -> Result<Json<BusinessSummary>, AppError> {
    let summary = business_service::create_business(&state, &current.user, payload).await?;
    Ok(Json(summary))
}

/// The business the requester belongs to, or `null`.
#[utoipa::path(
    get,
    path = "/businesses/mine",
    tag = "business",
    responses(
        (status = 200, description = "Business membership", body = Option<BusinessSummary>)
    )
)]
pub async fn my_business(
    State(state): State<SharedState>,
    current: CurrentUser,
) -> Result<Json<Option<BusinessSummary>>, AppError> {
    let summary = business_service::my_business(&state, &current.user).await?;
    Ok(Json(summary))
}

/// Update business settings.
#[utoipa::path(
    patch,
    path = "/businesses/{id}",
    tag = "business",
    params(("id" = Uuid, Path, description = "Business to update")),
    request_body = UpdateBusinessRequest,
    responses(
        (status = 200, description = "Business updated", body = BusinessSummary),
        (status = 403, description = "Requester is not staff of this business"),
        (status = 409, description = "New slug already taken")
    )
)]
pub async fn update_business(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateBusinessRequest>>,
) -> Result<Json<BusinessSummary>, AppError> {
    let summary = business_service::update_business(&state, &current.user, id, payload).await?;
    Ok(Json(summary))
}
