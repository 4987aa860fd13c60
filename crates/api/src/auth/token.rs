//! Session-token generation and validation.
//!
//! Sessions are HS256-signed tokens carrying a [`Claims`] payload. The
//! `jti` claim is registered in the live-session set at login and removed
//! at logout, which is what turns a stateless token into a revocable
//! session flag.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the admin username.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique session identifier (UUID v4), revoked on logout.
    pub jti: String,
}

/// Generate an HS256 session token for the admin.
///
/// Returns the signed token together with its claims so the caller can
/// register the fresh `jti` without re-decoding.
pub fn generate_session_token(
    username: &str,
    config: &AuthConfig,
) -> Result<(String, Claims), jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_mins * 60;

    let claims = Claims {
        sub: username.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )?;
    Ok((token, claims))
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. Liveness of the
/// `jti` is the caller's concern.
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            session_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
            admin_username: "admin".to_string(),
            admin_password_hash: "$argon2id$unused".to_string(),
        }
    }

    #[test]
    fn generate_and_validate_session_token() {
        let config = test_config();
        let (token, issued) = generate_session_token("admin", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.jti, issued.jti);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token, well past the default
        // 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.session_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn different_secrets_fail() {
        let config_a = test_config();
        let mut config_b = test_config();
        config_b.session_secret = "another-secret-entirely".to_string();

        let (token, _) = generate_session_token("admin", &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }
}
