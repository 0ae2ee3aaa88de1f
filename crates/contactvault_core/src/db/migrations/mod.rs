//! Ordered schema migrations for the contact store.
//!
//! # Responsibility
//! - Keep the list of schema steps the binary knows about.
//! - Bring a connection up to the latest step inside one transaction.
//!
//! # Invariants
//! - Step versions are strictly increasing.
//! - The applied step is recorded in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the newest schema version this binary can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every step newer than the database's recorded version.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file was written by a newer binary.
/// - `DbError::Migration` when a step fails; the transaction is rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let on_disk = schema_version(conn)?;
    let latest = latest_version();

    if on_disk > latest {
        return Err(DbError::SchemaTooNew {
            found: on_disk,
            supported: latest,
        });
    }

    let pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > on_disk)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        debug!(
            "event=db_migrate module=db status=start version={}",
            migration.version
        );
        tx.execute_batch(migration.sql)
            .and_then(|()| {
                tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            })
            .map_err(|source| DbError::Migration {
                version: migration.version,
                source,
            })?;
    }
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
