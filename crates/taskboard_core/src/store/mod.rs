//! Durable string-keyed store contracts and implementations.
//!
//! # Responsibility
//! - Define the minimal key-value contract the persistence gateway needs.
//! - Keep SQL details behind that contract.
//!
//! # Invariants
//! - `put` replaces the whole value for a key in one atomic statement.
//! - Keys are non-empty.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidKey,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "store key cannot be empty"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey => None,
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

/// Single-writer durable key-value store.
///
/// Implementations only need `Send`; callers that share a store across
/// threads wrap it in a mutex.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Returns whether a value existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}

pub(crate) fn ensure_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey);
    }
    Ok(())
}
