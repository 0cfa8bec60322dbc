//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ShoestoreConfig;

/// Application state shared across all handlers.
///
/// Cheap to clone; the configuration and pool live behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShoestoreConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Build the shared state from loaded configuration and a connected pool.
    #[must_use]
    pub fn new(config: ShoestoreConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &ShoestoreConfig {
        &self.inner.config
    }

    /// Returns a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }
}
