//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use obra_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub username: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with the single admin credential. On success the session
/// token's `jti` is registered as live; the caller is authenticated until
/// logout or expiry.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = &state.config.auth;

    // One credential pair; the same opaque rejection for either mismatch.
    if input.username != auth.admin_username {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &auth.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let (token, claims) = generate_session_token(&input.username, auth)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    // Register the session's jti so logout can revoke it.
    state.sessions.insert(&claims.jti).await;

    tracing::info!(username = %input.username, "Admin logged in");

    Ok(Json(AuthResponse {
        token,
        expires_in: auth.session_expiry_mins * 60,
        username: input.username,
    }))
}

/// POST /api/v1/auth/logout
///
/// Force authenticated -> anonymous by dropping the live session.
pub async fn logout(
    admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    state.sessions.remove(&admin.jti).await;
    tracing::info!(username = %admin.username, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}
