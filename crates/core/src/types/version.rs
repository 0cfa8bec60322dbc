//! Optimistic concurrency token for stored records.

use serde::{Deserialize, Serialize};

/// Row-version token attached to every stored record.
///
/// A record is loaded together with its current version; an update must
/// present that version back and is rejected when it no longer matches the
/// stored value. Versions start at [`RowVersion::ZERO`] and are bumped by
/// every successful update, so a matching token proves the record has not
/// changed since it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowVersion(i64);

impl RowVersion {
    /// The version assigned to freshly created records.
    pub const ZERO: Self = Self(0);

    /// Create a version token from an i64 value.
    #[must_use]
    pub const fn new(version: i64) -> Self {
        Self(version)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// The version a record carries after one more successful update.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RowVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RowVersion {
    fn from(version: i64) -> Self {
        Self(version)
    }
}

impl From<RowVersion> for i64 {
    fn from(version: RowVersion) -> Self {
        version.0
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for RowVersion {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for RowVersion {
    fn decode(
        value: sqlx::sqlite::SqliteValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let version = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(version))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for RowVersion {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}
