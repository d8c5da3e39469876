//! Blog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLOG_SESSION_SECRET` - Session signing secret (min 32 chars)
//! - `RESUME_ACCESS_CODE` - Access code gating the resume download
//! - `TRUSTIFI_URL` - Base URL of the transactional email API
//! - `TRUSTIFI_KEY` - Email API key (sent as a request header)
//! - `TRUSTIFI_SECRET` - Email API secret (sent as a request header)
//! - `CONTACT_RECIPIENT` - Address contact-form messages are delivered to
//!
//! ## Optional
//! - `BLOG_DATABASE_URL` - SQLite connection string (default: sqlite:blog.db)
//! - `BLOG_HOST` - Bind address (default: 127.0.0.1)
//! - `BLOG_PORT` - Listen port (default: 8000)
//! - `BLOG_BASE_URL` - Public URL (default: http://localhost:8000)
//! - `RESUME_FILE` - Path of the resume file (default: static/files/resume.pdf)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Blog application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string.
    pub database_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL for the blog.
    pub base_url: String,
    /// Session signing secret.
    pub session_secret: SecretString,
    /// Access code gating the public resume download.
    pub resume_access_code: SecretString,
    /// Path of the resume file streamed by the download routes.
    pub resume_file: PathBuf,
    /// Outbound email API configuration.
    pub trustifi: TrustifiConfig,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

/// Outbound email API configuration.
///
/// `SecretString` fields redact themselves in `Debug` output.
#[derive(Debug, Clone)]
pub struct TrustifiConfig {
    /// Base URL of the API (the email path is appended to this).
    pub base_url: String,
    /// API key, sent in the `x-trustifi-key` header.
    pub api_key: SecretString,
    /// API secret, sent in the `x-trustifi-secret` header.
    pub api_secret: SecretString,
    /// Fixed recipient of contact-form messages.
    pub recipient: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("BLOG_DATABASE_URL", "sqlite:blog.db");
        let host = get_env_or_default("BLOG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOG_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("BLOG_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOG_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("BLOG_BASE_URL", "http://localhost:8000");

        let session_secret = get_required_secret("BLOG_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "BLOG_SESSION_SECRET")?;

        let resume_access_code = get_required_secret("RESUME_ACCESS_CODE")?;
        let resume_file =
            PathBuf::from(get_env_or_default("RESUME_FILE", "static/files/resume.pdf"));

        let trustifi = TrustifiConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            resume_access_code,
            resume_file,
            trustifi,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TrustifiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_required_env("TRUSTIFI_URL")?,
            api_key: get_required_secret("TRUSTIFI_KEY")?,
            api_secret: get_required_secret("TRUSTIFI_SECRET")?,
            recipient: get_required_env("CONTACT_RECIPIENT")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
