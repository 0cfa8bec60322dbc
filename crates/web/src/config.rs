//! Web application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOESTORE_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then to the built-in default)
//! - `SHOESTORE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOESTORE_PORT` - Listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Connection string used when no environment variable is set.
///
/// `mode=rwc` lets the pool create the database file on first connect.
const DEFAULT_DATABASE_URL: &str = "sqlite://shoestore.db?mode=rwc";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shoestore application configuration.
#[derive(Debug, Clone)]
pub struct ShoestoreConfig {
    /// Database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ShoestoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHOESTORE_DATABASE_URL");
        let host = get_env_or_default("SHOESTORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOESTORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOESTORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOESTORE_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get the database URL with fallback to the generic `DATABASE_URL` and
/// finally to the built-in default.
fn get_database_url(primary_key: &str) -> SecretString {
    if let Ok(value) = std::env::var(primary_key) {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from(DEFAULT_DATABASE_URL)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
