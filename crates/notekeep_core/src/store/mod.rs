//! Local key-value string store.
//!
//! # Responsibility
//! - Define the `KvStore` contract used to persist application state.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque strings; the store never interprets them.
//! - A failed `set_item` leaves the previously stored value untouched.
//! - When a quota is configured, the total character count of all keys and
//!   values never exceeds it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Default store quota, in characters across all keys and values.
pub const DEFAULT_STORE_QUOTA: usize = 5 * 1024 * 1024;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store read/write failure.
#[derive(Debug)]
pub enum StoreError {
    /// Backend transport failure.
    Db(DbError),
    /// Write rejected because it would exceed the configured quota.
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded {
                key,
                required,
                quota,
            } => write!(
                f,
                "store quota exceeded writing `{key}`: {required} chars required, quota is {quota}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value store with local persistence semantics.
pub trait KvStore {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// Size of one entry in quota units.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.chars().count() + value.chars().count()
}

/// Checks that replacing `key` with `value` keeps usage within `quota`.
///
/// `others_usage` is the usage of every entry except `key`.
pub(crate) fn check_quota(
    quota: Option<usize>,
    others_usage: usize,
    key: &str,
    value: &str,
) -> StoreResult<()> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let required = others_usage + entry_size(key, value);
    if required > quota {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            required,
            quota,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_quota, entry_size, StoreError};

    #[test]
    fn entry_size_counts_chars_not_bytes() {
        assert_eq!(entry_size("k", "é"), 2);
    }

    #[test]
    fn check_quota_allows_exact_fit_and_rejects_overflow() {
        assert!(check_quota(Some(4), 2, "a", "b").is_ok());
        let err = check_quota(Some(4), 3, "a", "b").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                required: 5,
                quota: 4,
                ..
            }
        ));
    }

    #[test]
    fn check_quota_without_limit_accepts_anything() {
        assert!(check_quota(None, usize::MAX / 2, "k", "v").is_ok());
    }
}
