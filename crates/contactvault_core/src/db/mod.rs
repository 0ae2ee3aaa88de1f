//! SQLite bootstrap for the contact store.
//!
//! # Responsibility
//! - Open file-backed or in-memory connections.
//! - Run schema migrations before any contact data is touched.
//!
//! # Invariants
//! - A connection handed out by this module is fully migrated.
//! - Schema version lives in `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening, migrating or closing the contact store.
#[derive(Debug)]
pub enum DbError {
    /// Statement or connection failure outside migration.
    Sqlite(rusqlite::Error),
    /// A schema step failed; nothing from the pending batch was kept.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The store file was written by a newer ContactVault.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection refused to close cleanly.
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "contact store error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "contact store migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "contact store schema version {found} is newer than supported {supported}; \
                 upgrade ContactVault to open it"
            ),
            Self::Close(err) => write!(f, "contact store did not close cleanly: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Close(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
