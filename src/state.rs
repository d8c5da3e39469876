//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::trustifi::{TrustifiClient, TrustifiError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration, the
/// database pool, and the outbound email client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    mailer: TrustifiClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the email client cannot be built from the
    /// configured credentials.
    pub fn new(config: AppConfig, pool: SqlitePool) -> Result<Self, TrustifiError> {
        let mailer = TrustifiClient::new(&config.trustifi)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mailer,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the outbound email client.
    #[must_use]
    pub fn mailer(&self) -> &TrustifiClient {
        &self.inner.mailer
    }
}
