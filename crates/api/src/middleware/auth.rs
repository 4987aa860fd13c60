//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use obra_core::error::CoreError;

use crate::auth::token::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated admin session extracted from a Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in every mutating handler. A request
/// without a valid, still-live session token is rejected with 401 before
/// the handler body runs.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    /// The admin username (from `claims.sub`).
    pub username: String,
    /// The live session identifier, needed by logout.
    pub jti: String,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.auth).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // A signed token whose session was logged out is anonymous again.
        if !state.sessions.contains(&claims.jti).await {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session is no longer active".into(),
            )));
        }

        Ok(RequireAdmin {
            username: claims.sub,
            jti: claims.jti,
        })
    }
}
