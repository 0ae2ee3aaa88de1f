//! Contact use-case service.
//!
//! # Responsibility
//! - Hold the overwrite-confirmation, edit and bulk transfer flows.
//! - Delegate persistence to a `ContactRepository`.
//!
//! # Invariants
//! - An existing record is only replaced after the caller's confirmation
//!   returns `true`; a decline leaves the table untouched.
//! - Edit always resupplies the full record (unedited fields keep their
//!   current values) before going through upsert.
//! - A bulk import that fails to decode writes nothing.

use crate::model::contact::{Contact, ContactEdit, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::transfer::{self, TransferError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, ContactServiceError>;

/// Errors reported to callers of the contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Required field missing.
    Validation(ContactValidationError),
    /// No contact with this name.
    NotFound(String),
    /// Export target could not be written.
    Io { path: PathBuf, source: TransferError },
    /// Import source does not exist.
    FileNotFound(PathBuf),
    /// Import aborted; remaining rows were not applied.
    ImportProcessing { path: PathBuf, reason: String },
    /// Storage failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "contact not found: {name}"),
            Self::Io { path, source } => {
                write!(f, "unable to write to file {}: {source}", path.display())
            }
            Self::FileNotFound(path) => write!(f, "file {} not found", path.display()),
            Self::ImportProcessing { path, reason } => {
                write!(f, "error processing file {}: {reason}", path.display())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(name) => Self::NotFound(name),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ContactValidationError> for ContactServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of an upsert request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed; a new one was written.
    Created,
    /// An existing record was confirmed and replaced.
    Replaced,
    /// An existing record was kept because confirmation was refused.
    Declined,
}

impl UpsertOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Replaced => "replaced",
            Self::Declined => "declined",
        }
    }
}

/// Per-row tally of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub replaced: usize,
    pub declined: usize,
    /// Rows without a name.
    pub skipped: usize,
}

impl ImportReport {
    /// Rows that ended up written.
    pub fn written(&self) -> usize {
        self.created + self.replaced
    }

    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Replaced => self.replaced += 1,
            UpsertOutcome::Declined => self.declined += 1,
        }
    }
}

/// Contact use-cases over any repository implementation.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts `contact`, or replaces the existing record with the same name
    /// once `confirm` agrees.
    ///
    /// `confirm` receives the currently stored record and is only called when
    /// one exists. The write carries exactly the non-empty fields of
    /// `contact`; anything not supplied is cleared.
    pub fn upsert<F>(&self, contact: &Contact, confirm: F) -> ServiceResult<UpsertOutcome>
    where
        F: FnOnce(&Contact) -> bool,
    {
        contact.validate()?;

        let outcome = match self.repo.get_contact(&contact.name)? {
            Some(existing) => {
                if confirm(&existing) {
                    UpsertOutcome::Replaced
                } else {
                    UpsertOutcome::Declined
                }
            }
            None => UpsertOutcome::Created,
        };

        if outcome != UpsertOutcome::Declined {
            self.repo.replace_contact(contact)?;
        }

        info!(
            "event=contact_upsert module=service status=ok outcome={} fields={}",
            outcome.as_str(),
            contact.present_columns().len()
        );
        Ok(outcome)
    }

    /// Deletes the contact named `name`.
    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        self.repo.delete_contact(name)?;
        info!("event=contact_delete module=service status=ok");
        Ok(())
    }

    /// Looks up one contact by exact name.
    pub fn find(&self, name: &str) -> ServiceResult<Contact> {
        self.repo
            .get_contact(name)?
            .ok_or_else(|| ContactServiceError::NotFound(name.to_string()))
    }

    /// Returns every stored contact, ordered by name.
    pub fn list(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.list_contacts()?)
    }

    /// Edits the contact named `name`.
    ///
    /// `editor` sees the current record and returns replacement values;
    /// the merged record is then written through `upsert` with `confirm`.
    pub fn edit<E, F>(&self, name: &str, editor: E, confirm: F) -> ServiceResult<UpsertOutcome>
    where
        E: FnOnce(&Contact) -> ContactEdit,
        F: FnOnce(&Contact) -> bool,
    {
        let current = self.find(name)?;
        let edit = editor(&current);
        let merged = edit.apply_to(&current);
        self.upsert(&merged, confirm)
    }

    /// Writes every contact to the CSV file at `path`.
    ///
    /// Returns the number of data rows written.
    pub fn export_all(&self, path: &Path) -> ServiceResult<usize> {
        let contacts = self.list()?;
        let written = transfer::export_contacts(path, &contacts).map_err(|source| {
            warn!("event=contact_export module=service status=error error={source}");
            ContactServiceError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!("event=contact_export module=service status=ok rows={written}");
        Ok(written)
    }

    /// Upserts every row of the CSV file at `path`.
    ///
    /// `confirm` is consulted for each row whose name already exists.
    /// Rows without a name are skipped and counted.
    pub fn import_bulk<F>(&self, path: &Path, mut confirm: F) -> ServiceResult<ImportReport>
    where
        F: FnMut(&Contact) -> bool,
    {
        if !path.exists() {
            warn!("event=contact_import module=service status=error error_code=file_not_found");
            return Err(ContactServiceError::FileNotFound(path.to_path_buf()));
        }

        let rows = transfer::import_contacts(path)
            .map_err(|err| import_failure(path, err.to_string()))?;

        let mut report = ImportReport::default();
        for row in rows {
            if row.validate().is_err() {
                report.skipped += 1;
                continue;
            }
            let outcome = self
                .upsert(&row, &mut confirm)
                .map_err(|err| import_failure(path, err.to_string()))?;
            report.record(outcome);
        }

        info!(
            "event=contact_import module=service status=ok created={} replaced={} declined={} skipped={}",
            report.created, report.replaced, report.declined, report.skipped
        );
        Ok(report)
    }
}

fn import_failure(path: &Path, reason: String) -> ContactServiceError {
    warn!("event=contact_import module=service status=error error={reason}");
    ContactServiceError::ImportProcessing {
        path: path.to_path_buf(),
        reason,
    }
}
