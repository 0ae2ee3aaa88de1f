//! Contact domain model.
//!
//! # Responsibility
//! - Define the name-keyed contact record and its edit overlay.
//! - Own the group label encoding shared by storage and CSV transfer.
//!
//! # Invariants
//! - `name` is the only identity; it must not be blank.
//! - A blank optional value (empty or whitespace only) means "absent" and is
//!   never written as a column.
//! - Group labels are trimmed and never empty.

use std::error::Error;
use std::fmt::{Display, Formatter};

const GROUP_SEPARATOR: &str = ",";

/// Persisted column names in table order.
pub const CONTACT_COLUMNS: [&str; 7] = [
    "name",
    "phone_number",
    "work",
    "company",
    "title",
    "email",
    "groups",
];

/// One address-book entry, keyed by `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// Primary key. Replacing a contact means writing the same name again.
    pub name: String,
    pub phone_number: Option<String>,
    pub work: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    /// Free-text labels, stored comma-joined.
    pub groups: Vec<String>,
}

/// Validation failures for contact writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name is required"),
        }
    }
}

impl Error for ContactValidationError {}

impl Contact {
    /// Creates a contact carrying only its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks the write invariants.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns `(column, value)` pairs for every field that carries a value.
    ///
    /// `name` is always first. Blank optional fields and an empty group list
    /// are left out, so an insert-or-replace built from this set leaves them
    /// NULL.
    pub fn present_columns(&self) -> Vec<(&'static str, String)> {
        let mut columns = vec![("name", self.name.clone())];

        let optional = [
            ("phone_number", &self.phone_number),
            ("work", &self.work),
            ("company", &self.company),
            ("title", &self.title),
            ("email", &self.email),
        ];
        columns.extend(optional.into_iter().filter_map(|(column, value)| {
            non_empty(value.as_deref()).map(|value| (column, value))
        }));

        let groups = join_groups(&self.groups);
        if !groups.is_empty() {
            columns.push(("groups", groups));
        }

        columns
    }

    /// Returns a copy with blank optional strings collapsed to `None` and
    /// group labels re-normalized.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            phone_number: non_empty(self.phone_number.as_deref()),
            work: non_empty(self.work.as_deref()),
            company: non_empty(self.company.as_deref()),
            title: non_empty(self.title.as_deref()),
            email: non_empty(self.email.as_deref()),
            groups: split_groups(&join_groups(&self.groups)),
        }
    }
}

/// Replacement values for the edit flow.
///
/// `None` keeps the current value of the field; `Some` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub phone_number: Option<String>,
    pub work: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub groups: Option<Vec<String>>,
}

impl ContactEdit {
    /// Overlays this edit on `current`, producing the full record to resupply.
    pub fn apply_to(&self, current: &Contact) -> Contact {
        fn pick(edit: &Option<String>, current: &Option<String>) -> Option<String> {
            edit.clone().or_else(|| current.clone())
        }

        Contact {
            name: current.name.clone(),
            phone_number: pick(&self.phone_number, &current.phone_number),
            work: pick(&self.work, &current.work),
            company: pick(&self.company, &current.company),
            title: pick(&self.title, &current.title),
            email: pick(&self.email, &current.email),
            groups: self
                .groups
                .clone()
                .unwrap_or_else(|| current.groups.clone()),
        }
    }

    /// Returns whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Joins group labels into their stored form.
pub fn join_groups(groups: &[String]) -> String {
    groups
        .iter()
        .map(|group| group.trim())
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}

/// Splits a stored or typed group string into trimmed, non-empty labels.
pub fn split_groups(value: &str) -> Vec<String> {
    value
        .split(GROUP_SEPARATOR)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps blank input (empty or whitespace only) to `None`; anything else is
/// kept verbatim.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
