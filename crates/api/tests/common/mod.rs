use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use obra_api::auth::password::hash_password;
use obra_api::auth::sessions::SessionSet;
use obra_api::config::{AuthConfig, ServerConfig, UPLOAD_URL_PREFIX};
use obra_api::state::AppState;
use obra_api::app_router;
use obra_store::{MediaStorage, ProjectRepo};

/// Credential pair the test admin logs in with.
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "hormigon-armado-2025";

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "obra-test-boundary";

/// Build a test `ServerConfig` rooted in a throwaway directory.
///
/// The admin hash is minted fresh per test, so the plain-text credential
/// only ever exists in this harness.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_file: dir.path().join("projects.json"),
        upload_dir: dir.path().join("uploads"),
        max_upload_bytes: 16 * 1024 * 1024,
        auth: AuthConfig {
            session_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
            admin_username: ADMIN_USER.to_string(),
            admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
        },
    }
}

/// Build the full application router with all middleware layers, backed by
/// the given temp directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, panic
/// recovery) that production uses. Clone the returned router per request;
/// clones share state.
pub fn build_test_app(dir: &TempDir) -> Router {
    let config = test_config(dir);

    let uploads = MediaStorage::new(config.upload_dir.clone(), UPLOAD_URL_PREFIX);
    let repo = Arc::new(ProjectRepo::new(config.data_file.clone(), uploads));

    let state = AppState {
        repo,
        config: Arc::new(config),
        sessions: Arc::new(SessionSet::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let request_id_header = HeaderName::from_static("x-request-id");

    app_router(state)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
}

/// Send a GET request.
pub async fn get(app: &Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a JSON POST request, optionally authenticated.
pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a bodyless request (POST/PUT/DELETE), optionally authenticated.
pub async fn send_empty(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a multipart request built by [`multipart_body`].
pub async fn send_multipart(
    app: &Router,
    method: Method,
    path: &str,
    body: Vec<u8>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Assemble a multipart/form-data body with the given text fields and
/// `files` parts.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (filename, data) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as the test admin and return the session token.
pub async fn login(app: &Router) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login must succeed");

    let json = body_json(response).await;
    json["token"].as_str().expect("token must be a string").to_string()
}
