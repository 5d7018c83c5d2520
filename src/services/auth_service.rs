use std::time::SystemTime;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use rand::{Rng, distr::Alphanumeric};
use uuid::Uuid;

use crate::{
    dao::models::{SessionEntity, UserEntity},
    dto::auth::{SessionResponse, SignInRequest, SignUpRequest},
    error::ServiceError,
    state::SharedState,
};

/// Length of session bearer tokens.
const SESSION_TOKEN_LEN: usize = 48;

/// Register a new account and open a session for it.
pub async fn sign_up(
    state: &SharedState,
    request: SignUpRequest,
) -> Result<SessionResponse, ServiceError> {
    let store = state.require_order_store().await?;

    let email = normalize_email(&request.email);
    let user = UserEntity {
        id: Uuid::new_v4(),
        email: Some(email),
        password_hash: Some(hash_password(&request.password)?),
        created_at: SystemTime::now(),
    };

    store.insert_user(user.clone()).await?;
    open_session(state, user).await
}

/// Open a session for an existing account.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
pub async fn sign_in(
    state: &SharedState,
    request: SignInRequest,
) -> Result<SessionResponse, ServiceError> {
    let store = state.require_order_store().await?;

    let email = normalize_email(&request.email);
    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or(ServiceError::Unauthenticated)?;

    let hash = user
        .password_hash
        .as_deref()
        .ok_or(ServiceError::Unauthenticated)?;
    if !verify_password(&request.password, hash) {
        return Err(ServiceError::Unauthenticated);
    }

    open_session(state, user).await
}

/// Create an anonymous account and open a session for it.
///
/// Anonymous accounts carry no credentials and cannot be signed into again
/// once their session expires.
pub async fn sign_in_anonymous(state: &SharedState) -> Result<SessionResponse, ServiceError> {
    let store = state.require_order_store().await?;

    let user = UserEntity {
        id: Uuid::new_v4(),
        email: None,
        password_hash: None,
        created_at: SystemTime::now(),
    };
    store.insert_user(user.clone()).await?;
    open_session(state, user).await
}

/// Invalidate a session; unknown tokens succeed silently.
pub async fn sign_out(state: &SharedState, token: String) -> Result<(), ServiceError> {
    let store = state.require_order_store().await?;
    store.delete_session(token).await?;
    Ok(())
}

/// Resolve a bearer token to its user, rejecting expired sessions.
pub async fn current_user(
    state: &SharedState,
    token: &str,
) -> Result<(UserEntity, SessionEntity), ServiceError> {
    let store = state.require_order_store().await?;

    let session = store
        .find_session(token.to_owned())
        .await?
        .ok_or(ServiceError::Unauthenticated)?;

    if session.expires_at <= SystemTime::now() {
        // The TTL index lags by up to a minute; enforce expiry here too.
        let _ = store.delete_session(session.token.clone()).await;
        return Err(ServiceError::Unauthenticated);
    }

    let user = store
        .find_user(session.user_id)
        .await?
        .ok_or(ServiceError::Unauthenticated)?;

    Ok((user, session))
}

/// Generate an alphanumeric token of the given length.
pub fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

async fn open_session(
    state: &SharedState,
    user: UserEntity,
) -> Result<SessionResponse, ServiceError> {
    let store = state.require_order_store().await?;

    let now = SystemTime::now();
    let session = SessionEntity {
        token: random_token(SESSION_TOKEN_LEN),
        user_id: user.id,
        created_at: now,
        expires_at: now + state.config().session_ttl,
    };
    store.insert_session(session.clone()).await?;

    Ok(SessionResponse {
        token: session.token,
        expires_at: crate::dto::format_system_time(session.expires_at),
        user: user.into(),
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tokens_are_unique_and_sized() {
        let a = random_token(SESSION_TOKEN_LEN);
        let b = random_token(SESSION_TOKEN_LEN);
        assert_eq!(a.len(), SESSION_TOKEN_LEN);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hashes() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn email_normalization() {
        assert_eq!(normalize_email("  Staff@Cafe.Example \n"), "staff@cafe.example");
    }
}
