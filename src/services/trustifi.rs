//! Trustifi API client for relaying contact-form messages.
//!
//! Builds a fixed-recipient email from the submitted fields and POSTs it to
//! the configured endpoint with the two header-based credentials. The call is
//! synchronous from the handler's point of view, bounded by a client timeout,
//! and never retried; a non-2xx response is an error the caller surfaces.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::TrustifiConfig;

/// Path of the send-email endpoint, appended to the configured base URL.
const EMAIL_PATH: &str = "/api/i/v1/email";

/// Subject line of relayed contact messages.
const EMAIL_TITLE: &str = "New message from the blog contact form";

/// Timeout applied to every outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when relaying a message.
#[derive(Debug, Error)]
pub enum TrustifiError {
    /// HTTP request failed (connect error, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Configured credential cannot be used as a request header.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

/// Trustifi API client.
#[derive(Clone)]
pub struct TrustifiClient {
    client: reqwest::Client,
    base_url: String,
    recipient: String,
}

impl TrustifiClient {
    /// Create a new Trustifi API client.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &TrustifiConfig) -> Result<Self, TrustifiError> {
        let mut headers = HeaderMap::new();

        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| TrustifiError::InvalidCredential(format!("api key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-trustifi-key", key);

        let mut secret = HeaderValue::from_str(config.api_secret.expose_secret())
            .map_err(|e| TrustifiError::InvalidCredential(format!("api secret: {e}")))?;
        secret.set_sensitive(true);
        headers.insert("x-trustifi-secret", secret);

        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            recipient: config.recipient.clone(),
        })
    }

    /// Relay a contact-form submission to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns `TrustifiError::Http` on transport failure and
    /// `TrustifiError::Api` when the API answers with a non-success status.
    pub async fn send_contact_message(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        message: &str,
    ) -> Result<(), TrustifiError> {
        let url = format!("{}{EMAIL_PATH}", self.base_url);
        let body = contact_payload(&self.recipient, name, email, phone, message);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TrustifiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(status = status.as_u16(), "contact message relayed");
        Ok(())
    }
}

/// Build the send-email payload.
///
/// The submitted fields are embedded in an HTML string, so each one is
/// escaped before interpolation.
fn contact_payload(
    recipient: &str,
    name: &str,
    email: &str,
    phone: &str,
    message: &str,
) -> serde_json::Value {
    let html = format!(
        "Name: {}; Phone number: {}; Email: {}; Message: {}",
        escape_html(name),
        escape_html(phone),
        escape_html(email),
        escape_html(message),
    );

    serde_json::json!({
        "recipients": [{ "email": recipient }],
        "title": EMAIL_TITLE,
        "html": html,
    })
}

/// Escape the five HTML-significant characters.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
