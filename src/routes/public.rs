use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::{business::PublicBusinessSummary, public::PublicBuzzerResponse},
    error::AppError,
    services::{business_service, public_service},
    state::SharedState,
};

/// Unauthenticated routes backing the customer-facing pages.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/public/buzzers/{token}", get(get_buzzer))
        .route("/public/businesses/{slug}", get(resolve_slug))
}

/// Customer view of one buzzer, addressed by its tracking token.
#[utoipa::path(
    get,
    path = "/public/buzzers/{token}",
    tag = "public",
    params(("token" = String, Path, description = "Public tracking token")),
    responses(
        (status = 200, description = "Order state", body = PublicBuzzerResponse),
        (status = 404, description = "Unknown token")
    )
)]
pub async fn get_buzzer(
    State(state): State<SharedState>,
    Path(token): Path<String>,
) -> Result<Json<PublicBuzzerResponse>, AppError> {
    let response = public_service::get_buzzer_by_token(&state, &token).await?;
    Ok(Json(response))
}

/// Resolve a business slug for the public order page.
#[utoipa::path(
    get,
    path = "/public/businesses/{slug}",
    tag = "public",
    params(("slug" = String, Path, description = "Business slug")),
    responses(
        (status = 200, description = "Business context", body = PublicBusinessSummary),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn resolve_slug(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicBusinessSummary>, AppError> {
    let summary = business_service::resolve_slug(&state, &slug).await?;
    Ok(Json(summary))
}
