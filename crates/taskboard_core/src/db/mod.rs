//! SQLite container behind the durable key-value store.
//!
//! # Responsibility
//! - Open connections whose `kv_store` table is ready for reads/writes.
//! - Refuse files written by a newer build or missing the store table.
//!
//! # Invariants
//! - Container version lives in `PRAGMA user_version`.
//! - A connection returned from `open_db*` always has `kv_store`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::{latest_version, schema_version, KV_TABLE};
pub use open::{open_db, open_db_in_memory};

/// File name used by `SqliteKeyValueStore::open_in_dir`.
pub const DEFAULT_DB_FILE_NAME: &str = "boards_prefs.sqlite3";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a build with a newer container layout.
    SchemaTooNew { found: u32, supported: u32 },
    /// `user_version` claims the layout is current but `kv_store` is absent.
    MissingKvTable { version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store container version {found} is newer than supported {supported}"
            ),
            Self::MissingKvTable { version } => write!(
                f,
                "store container at version {version} has no `{KV_TABLE}` table"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::MissingKvTable { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
