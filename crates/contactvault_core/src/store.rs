//! Process-owned contact store.
//!
//! # Responsibility
//! - Own the SQLite connection for the lifetime of the store.
//! - Expose the contact use-cases without leaking the connection.
//!
//! # Invariants
//! - The connection is migrated before the store is handed out.
//! - `close` releases the connection and reports close failures; dropping the
//!   store releases it silently.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::contact::{Contact, ContactEdit};
use crate::repo::contact_repo::SqliteContactRepository;
use crate::service::contact_service::{ContactService, ImportReport, ServiceResult, UpsertOutcome};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Address book backed by one owned SQLite connection.
pub struct ContactStore {
    conn: Connection,
    location: Option<PathBuf>,
}

impl ContactStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            conn: open_db(path)?,
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens a store that lives only as long as this value.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            location: None,
        })
    }

    /// Backing file, or `None` for an in-memory store.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Builds the use-case service over this store's connection.
    pub fn service(&self) -> ContactService<SqliteContactRepository<'_>> {
        ContactService::new(SqliteContactRepository::new(&self.conn))
    }

    pub fn upsert<F>(&self, contact: &Contact, confirm: F) -> ServiceResult<UpsertOutcome>
    where
        F: FnOnce(&Contact) -> bool,
    {
        self.service().upsert(contact, confirm)
    }

    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        self.service().delete(name)
    }

    pub fn find(&self, name: &str) -> ServiceResult<Contact> {
        self.service().find(name)
    }

    pub fn list(&self) -> ServiceResult<Vec<Contact>> {
        self.service().list()
    }

    pub fn edit<E, F>(&self, name: &str, editor: E, confirm: F) -> ServiceResult<UpsertOutcome>
    where
        E: FnOnce(&Contact) -> ContactEdit,
        F: FnOnce(&Contact) -> bool,
    {
        self.service().edit(name, editor, confirm)
    }

    pub fn export_all(&self, path: &Path) -> ServiceResult<usize> {
        self.service().export_all(path)
    }

    pub fn import_bulk<F>(&self, path: &Path, confirm: F) -> ServiceResult<ImportReport>
    where
        F: FnMut(&Contact) -> bool,
    {
        self.service().import_bulk(path, confirm)
    }

    /// Closes the underlying connection.
    pub fn close(self) -> DbResult<()> {
        let mode = if self.location.is_some() { "file" } else { "memory" };
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok mode={mode}");
                Ok(())
            }
            Err((_, err)) => {
                error!("event=db_close module=db status=error mode={mode} error={err}");
                Err(DbError::Close(err))
            }
        }
    }
}
