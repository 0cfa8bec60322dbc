//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shoestore-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SHOESTORE_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then to the built-in default)
//!
//! # Migration Files
//!
//! Migrations live in `crates/web/migrations/` as ordered SQL files and
//! are embedded into the binary. sqlx records each applied step in its
//! `_sqlx_migrations` table, so a rerun only applies the remainder.

use thiserror::Error;

use shoestore_web::config::{ConfigError, ShoestoreConfig};
use shoestore_web::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending schema migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database cannot be reached or a
/// migration step fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let config = ShoestoreConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Starting migration...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migration done");
    Ok(())
}
