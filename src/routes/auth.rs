use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::auth::{SessionResponse, SignInRequest, SignUpRequest, UserSummary},
    error::AppError,
    services::auth_service,
    state::SharedState,
};

/// Routes handling account and session management.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/anonymous", post(sign_in_anonymous))
        .route("/auth/signout", post(sign_out))
        .route("/auth/session", get(session))
}

/// Authenticated requester, extracted from the `Authorization` header.
pub struct CurrentUser {
    /// The resolved account.
    pub user: crate::dao::models::UserEntity,
    /// The bearer token the session was resolved from.
    pub token: String,
}

impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;
        let (user, session) = auth_service::current_user(state, &token).await?;
        Ok(Self {
            user,
            token: session.token,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

/// Register a new staff account and open a session.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = SessionResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn sign_up(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SignUpRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = auth_service::sign_up(&state, payload).await?;
    Ok(Json(response))
}

/// Open a session for an existing account.
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SignInRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = auth_service::sign_in(&state, payload).await?;
    Ok(Json(response))
}

/// Open a session for a fresh anonymous account.
#[utoipa::path(
    post,
    path = "/auth/anonymous",
    tag = "auth",
    responses(
        (status = 200, description = "Session opened", body = SessionResponse)
    )
)]
pub async fn sign_in_anonymous(
    State(state): State<SharedState>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = auth_service::sign_in_anonymous(&state).await?;
    Ok(Json(response))
}

/// Invalidate the presented session.
#[utoipa::path(
    post,
    path = "/auth/signout",
    tag = "auth",
    responses(
        (status = 204, description = "Session invalidated")
    )
)]
pub async fn sign_out(
    State(state): State<SharedState>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    auth_service::sign_out(&state, current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The account behind the presented session.
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserSummary),
        (status = 401, description = "Missing or expired session")
    )
)]
pub async fn session(current: CurrentUser) -> Json<UserSummary> {
    Json(current.user.into())
}
