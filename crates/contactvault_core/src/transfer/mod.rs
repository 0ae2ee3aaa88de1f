//! Tabular file transfer for the address book.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod csv_port;

pub use csv_port::{
    export_contacts, import_contacts, read_contacts, write_contacts, CSV_HEADERS,
};

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    Csv(csv::Error),
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::MalformedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "malformed row at line {line}: expected {expected} fields, found {found}"
            ),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::MalformedRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for TransferError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
