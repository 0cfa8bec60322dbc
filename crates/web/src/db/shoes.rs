//! Database operations for shoe records.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoestore_core::{RowVersion, ShoeId};

use super::RepositoryError;
use crate::models::{CreateShoeInput, Shoe, UpdateShoeInput};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for shoe queries.
#[derive(Debug, sqlx::FromRow)]
struct ShoeRow {
    id: ShoeId,
    name: Option<String>,
    price: Option<i64>,
    created_date: DateTime<Utc>,
    row_version: RowVersion,
}

impl From<ShoeRow> for Shoe {
    fn from(row: ShoeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            created_date: row.created_date,
            row_version: row.row_version,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for shoe database operations.
///
/// Updates are optimistic: no lock is held between loading a record and
/// writing it back. A conditional UPDATE guarded on the stored row version
/// detects writes that raced ahead, and reports them instead of overwriting.
pub struct ShoeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShoeRepository<'a> {
    /// Create a new shoe repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all shoes, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Shoe>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShoeRow>(
            r"
            SELECT id, name, price, created_date, row_version
            FROM shoe
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a shoe by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShoeId) -> Result<Option<Shoe>, RepositoryError> {
        let row = sqlx::query_as::<_, ShoeRow>(
            r"
            SELECT id, name, price, created_date, row_version
            FROM shoe
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Check whether a shoe with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ShoeId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM shoe WHERE id = ?)
            ",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Create a new shoe. The store assigns the id and the initial version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &CreateShoeInput) -> Result<Shoe, RepositoryError> {
        let row = sqlx::query_as::<_, ShoeRow>(
            r"
            INSERT INTO shoe (name, price, created_date)
            VALUES (?, ?, ?)
            RETURNING id, name, price, created_date, row_version
            ",
        )
        .bind(input.name.as_deref())
        .bind(input.price)
        .bind(input.created_date)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a shoe, guarded by its row version.
    ///
    /// The UPDATE only matches when the stored version still equals
    /// `input.expected_version`, and bumps the version in the same
    /// statement. When nothing matched, the record was either deleted
    /// (`NotFound`) or modified by a concurrent writer (`Conflict`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shoe doesn't exist,
    /// `RepositoryError::Conflict` if it was concurrently modified, and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ShoeId,
        input: &UpdateShoeInput,
    ) -> Result<Shoe, RepositoryError> {
        let row = sqlx::query_as::<_, ShoeRow>(
            r"
            UPDATE shoe
            SET name = ?, price = ?, created_date = ?, row_version = row_version + 1
            WHERE id = ? AND row_version = ?
            RETURNING id, name, price, created_date, row_version
            ",
        )
        .bind(input.name.as_deref())
        .bind(input.price)
        .bind(input.created_date)
        .bind(id)
        .bind(input.expected_version)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                if self.exists(id).await? {
                    Err(RepositoryError::Conflict)
                } else {
                    Err(RepositoryError::NotFound)
                }
            }
        }
    }

    /// Delete a shoe.
    ///
    /// # Returns
    ///
    /// Returns `true` if the shoe was deleted, `false` if it didn't exist.
    /// A missing record is not an error; deletion is idempotent for callers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ShoeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shoe
            WHERE id = ?
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
