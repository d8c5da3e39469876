//! Shared helpers for integration tests.
//!
//! Tests drive the real router in process with an in-memory SQLite database,
//! carrying the session cookie between requests by hand.

#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use blog_server::build_app;
use blog_server::config::{AppConfig, TrustifiConfig};
use blog_server::db::MIGRATOR;
use blog_server::state::AppState;

/// Access code configured for the resume gate in tests.
pub const TEST_ACCESS_CODE: &str = "test-access-code";

/// A running application and its backing pool.
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

/// Build the app against a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_resume(PathBuf::from("does-not-exist.pdf")).await
}

/// Create a migrated in-memory pool.
pub async fn test_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}

/// Build the app with a specific resume file path.
pub async fn spawn_app_with_resume(resume_file: PathBuf) -> TestApp {
    let pool = test_pool().await;

    let state =
        AppState::new(test_config(resume_file), pool.clone()).expect("build application state");
    let app = build_app(state).await.expect("build application");

    TestApp { app, pool }
}

fn test_config(resume_file: PathBuf) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_owned(),
        host: "127.0.0.1".parse().expect("parse host"),
        port: 0,
        base_url: "http://localhost:8000".to_owned(),
        session_secret: SecretString::from(
            "integration-test-session-secret-0123456789abcdef".to_owned(),
        ),
        resume_access_code: SecretString::from(TEST_ACCESS_CODE.to_owned()),
        resume_file,
        trustifi: TrustifiConfig {
            // Port 1 refuses connections, so relay attempts fail fast offline
            base_url: "http://127.0.0.1:1".to_owned(),
            api_key: SecretString::from("test-key".to_owned()),
            api_secret: SecretString::from("test-secret".to_owned()),
            recipient: "owner@example.com".to_owned(),
        },
        sentry_dsn: None,
    }
}

/// Everything a test wants to know about a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub content_disposition: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert the response is a redirect to `path`.
    pub fn assert_redirects_to(&self, path: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect, got {} with body: {}",
            self.status,
            self.body
        );
        assert_eq!(self.location.as_deref(), Some(path));
    }
}

/// Send a GET request, optionally with a session cookie.
pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> TestResponse {
    send(app, "GET", path, None, cookie).await
}

/// Send a urlencoded form POST, optionally with a session cookie.
pub async fn post_form(
    app: &Router,
    path: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> TestResponse {
    send(app, "POST", path, Some(encode_form(fields)), cookie).await
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<String>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");

    TestResponse {
        status,
        location: header_string(&headers, &header::LOCATION),
        set_cookie: session_cookie(&headers),
        content_disposition: header_string(&headers, &header::CONTENT_DISPOSITION),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn header_string(headers: &HeaderMap, name: &header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Extract the `name=value` part of the session cookie, if one was set.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn urlencode(input: &str) -> String {
    let mut out = String::new();
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(b));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Register a user and return their session cookie.
pub async fn register_user(app: &Router, name: &str, email: &str, password: &str) -> String {
    let resp = post_form(
        app,
        "/register",
        &[("name", name), ("email", email), ("password", password)],
        None,
    )
    .await;
    resp.assert_redirects_to("/");
    resp.set_cookie.expect("session cookie after registration")
}

/// Log a user in and return their session cookie.
pub async fn login_user(app: &Router, email: &str, password: &str) -> String {
    let resp = post_form(
        app,
        "/login",
        &[("email", email), ("password", password)],
        None,
    )
    .await;
    resp.assert_redirects_to("/");
    resp.set_cookie.expect("session cookie after login")
}

/// Count the rows of a table.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}
