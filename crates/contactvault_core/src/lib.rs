//! Core logic for ContactVault, a name-keyed address book on SQLite.
//! Every write path and integrity rule for contacts lives in this crate.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod transfer;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    join_groups, split_groups, Contact, ContactEdit, ContactValidationError, CONTACT_COLUMNS,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{
    ContactService, ContactServiceError, ImportReport, ServiceResult, UpsertOutcome,
};
pub use store::ContactStore;
pub use transfer::{TransferError, CSV_HEADERS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
