use std::path::PathBuf;

/// Public url prefix the upload directory is served under.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

/// Server configuration loaded from environment variables.
///
/// Everything except the secrets has a default suitable for local
/// development. Secrets (session secret, admin credential) are required and
/// are never compiled into the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// The JSON document holding the whole project collection.
    pub data_file: PathBuf,
    /// Directory uploaded media lands in, served at [`UPLOAD_URL_PREFIX`].
    pub upload_dir: PathBuf,
    /// Maximum accepted request payload size in bytes (default: 200 MiB).
    pub max_upload_bytes: usize,
    /// Access-gate configuration (secret, expiry, admin credential).
    pub auth: AuthConfig,
}

/// Access-gate configuration: session token signing and the single admin
/// credential, all injected from the environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub session_secret: String,
    /// Session token lifetime in minutes (default: 720).
    pub session_expiry_mins: i64,
    /// The one admin username.
    pub admin_username: String,
    /// Argon2id PHC hash of the admin password. Compared hashed, never as
    /// plain text.
    pub admin_password_hash: String,
}

/// Default maximum payload size: 200 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Default session token expiry in minutes (12 hours).
const DEFAULT_SESSION_EXPIRY_MINS: i64 = 720;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_FILE`            | `projects.json`            |
    /// | `UPLOAD_DIR`           | `static/uploads`           |
    /// | `MAX_UPLOAD_BYTES`     | `209715200`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_file = PathBuf::from(
            std::env::var("DATA_FILE").unwrap_or_else(|_| "projects.json".into()),
        );

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_file,
            upload_dir,
            max_upload_bytes,
            auth,
        }
    }
}

impl AuthConfig {
    /// Load access-gate configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `SESSION_SECRET`      | **yes**  | --      |
    /// | `SESSION_EXPIRY_MINS` | no       | `720`   |
    /// | `ADMIN_USERNAME`      | **yes**  | --      |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty; misconfiguration
    /// should fail at startup, not at the first login.
    pub fn from_env() -> Self {
        let session_secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!session_secret.is_empty(), "SESSION_SECRET must not be empty");

        let session_expiry_mins: i64 = std::env::var("SESSION_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_MINS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_MINS must be a valid i64");

        let admin_username =
            std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set in the environment");
        assert!(!admin_username.is_empty(), "ADMIN_USERNAME must not be empty");

        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set in the environment");
        assert!(
            admin_password_hash.starts_with("$argon2"),
            "ADMIN_PASSWORD_HASH must be an Argon2 PHC string"
        );

        Self {
            session_secret,
            session_expiry_mins,
            admin_username,
            admin_password_hash,
        }
    }
}
