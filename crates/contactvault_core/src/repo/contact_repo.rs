//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide name-keyed read/replace/delete APIs over the `contacts` table.
//! - Keep every SQL statement for contacts inside this file.
//!
//! # Invariants
//! - Writes call `Contact::validate()` before touching the table. Reads do
//!   not: rows written by older tools may carry a blank name and must still
//!   list and export.
//! - `replace_contact` writes only the columns the contact carries; every
//!   other column of the row ends up NULL (insert-or-replace semantics).
//! - Column identifiers come from `CONTACT_COLUMNS`; values are always bound
//!   as parameters.

use crate::db::DbError;
use crate::model::contact::{
    split_groups, Contact, ContactValidationError, CONTACT_COLUMNS,
};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = r#"SELECT
    name,
    phone_number,
    work,
    company,
    title,
    email,
    "groups"
FROM contacts"#;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "contact not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for name-keyed contacts.
pub trait ContactRepository {
    /// Loads one contact by exact name.
    fn get_contact(&self, name: &str) -> RepoResult<Option<Contact>>;
    /// Loads every contact ordered by name.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Inserts or fully replaces the row keyed by `contact.name`.
    fn replace_contact(&self, contact: &Contact) -> RepoResult<()>;
    /// Hard-deletes one contact; `NotFound` when no row matched.
    fn delete_contact(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed contact repository borrowing a migrated connection.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn get_contact(&self, name: &str) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE name = ?1;"))?;

        let row = stmt
            .query_row([name], |row| Ok(read_contact_row(row)))
            .optional()?;

        row.transpose()
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(read_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn replace_contact(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;

        let columns = contact.present_columns();
        let identifiers = columns
            .iter()
            .map(|(column, _)| quote_column(column))
            .collect::<RepoResult<Vec<_>>>()?;
        let placeholders = (1..=columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>();

        let sql = format!(
            "INSERT OR REPLACE INTO contacts ({}) VALUES ({});",
            identifiers.join(", "),
            placeholders.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(columns.iter().map(|(_, value)| value)))?;

        Ok(())
    }

    fn delete_contact(&self, name: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE name = ?1;", [name])?;

        if changed == 0 {
            return Err(RepoError::NotFound(name.to_string()));
        }

        Ok(())
    }
}

fn quote_column(column: &str) -> RepoResult<String> {
    if !CONTACT_COLUMNS.contains(&column) {
        return Err(RepoError::InvalidData(format!(
            "unknown contacts column `{column}`"
        )));
    }
    Ok(format!("\"{column}\""))
}

fn read_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let groups = row
        .get::<_, Option<String>>("groups")?
        .map(|value| split_groups(&value))
        .unwrap_or_default();

    Ok(Contact {
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        work: row.get("work")?,
        company: row.get("company")?,
        title: row.get("title")?,
        email: row.get("email")?,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db_in_memory;

    #[test]
    fn replace_leaves_unsupplied_columns_null() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteContactRepository::new(&conn);

        let first = Contact {
            phone_number: Some("111".to_string()),
            ..Contact::new("Alice")
        };
        repo.replace_contact(&first).unwrap();

        let second = Contact {
            email: Some("a@x.com".to_string()),
            ..Contact::new("Alice")
        };
        repo.replace_contact(&second).unwrap();

        let phone: Option<String> = conn
            .query_row(
                "SELECT phone_number FROM contacts WHERE name = 'Alice';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(phone, None);
        assert_eq!(repo.get_contact("Alice").unwrap(), Some(second));
    }

    #[test]
    fn values_are_bound_not_interpolated() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteContactRepository::new(&conn);

        let tricky = Contact {
            title: Some("x'); DROP TABLE contacts; --".to_string()),
            ..Contact::new("Robert'); --")
        };
        repo.replace_contact(&tricky).unwrap();

        assert_eq!(repo.get_contact("Robert'); --").unwrap(), Some(tricky));
        assert_eq!(repo.list_contacts().unwrap().len(), 1);
    }

    #[test]
    fn blank_persisted_name_is_still_readable() {
        let conn = open_db_in_memory().unwrap();
        conn.execute("INSERT INTO contacts (name) VALUES ('  ');", [])
            .unwrap();
        let repo = SqliteContactRepository::new(&conn);
        repo.replace_contact(&Contact::new("Alice")).unwrap();

        let names = repo
            .list_contacts()
            .unwrap()
            .into_iter()
            .map(|contact| contact.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["  ", "Alice"]);
        assert_eq!(repo.get_contact("  ").unwrap(), Some(Contact::new("  ")));
        assert!(matches!(
            repo.replace_contact(&Contact::new("  ")),
            Err(RepoError::Validation(ContactValidationError::EmptyName))
        ));
    }

    #[test]
    fn unknown_column_is_rejected() {
        assert!(quote_column("name").is_ok());
        assert!(matches!(
            quote_column("name; DROP"),
            Err(RepoError::InvalidData(_))
        ));
    }
}
