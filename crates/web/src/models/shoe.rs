//! Shoe domain model, the single entity of the inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoestore_core::{RowVersion, ShoeId};

/// A shoe record as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoe {
    /// Unique shoe ID, assigned by the store and stable for the record's lifetime.
    pub id: ShoeId,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional price in whole currency units.
    pub price: Option<i64>,
    /// When the shoe entered the inventory. Always present.
    pub created_date: DateTime<Utc>,
    /// Concurrency token; must match on update.
    pub row_version: RowVersion,
}

/// Input for creating a new shoe.
///
/// The store assigns the id and the initial row version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShoeInput {
    /// Optional display name.
    pub name: Option<String>,
    /// Optional price in whole currency units.
    pub price: Option<i64>,
    /// When the shoe entered the inventory.
    pub created_date: DateTime<Utc>,
}

/// Input for updating an existing shoe.
///
/// All fields are written as submitted; `expected_version` is the token the
/// caller loaded the record with, and the update is rejected when it no
/// longer matches the stored version.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShoeInput {
    /// New display name (cleared when `None`).
    pub name: Option<String>,
    /// New price (cleared when `None`).
    pub price: Option<i64>,
    /// New creation timestamp.
    pub created_date: DateTime<Utc>,
    /// The row version the caller read before editing.
    pub expected_version: RowVersion,
}
