use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use validator::Validate;

use crate::dao::models::UserEntity;
use crate::dto::format_system_time;

/// Payload used to register a new staff account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SignUpRequest {
    /// Sign-in email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password, at least 8 characters.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Must match `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

/// Payload used for password sign-in.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SignInRequest {
    /// Sign-in email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Public projection of a user account.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Sign-in email, absent for anonymous users.
    pub email: Option<String>,
    /// Whether the account was created through anonymous sign-in.
    pub anonymous: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<UserEntity> for UserSummary {
    fn from(user: UserEntity) -> Self {
        let anonymous = user.is_anonymous();
        Self {
            id: user.id,
            email: user.email,
            anonymous,
            created_at: format_system_time(user.created_at),
        }
    }
}

/// Returned once a session has been established.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Bearer token to present in the `Authorization` header.
    pub token: String,
    /// Instant after which the session is rejected (RFC 3339).
    pub expires_at: String,
    /// The signed-in user.
    pub user: UserSummary,
}
