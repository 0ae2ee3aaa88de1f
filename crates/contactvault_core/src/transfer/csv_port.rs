//! CSV codec for bulk contact export and import.
//!
//! # Invariants
//! - Export always writes the header row, even for an empty address book.
//! - Column order is fixed: `CSV_HEADERS`.
//! - Import decodes the whole file before returning; any malformed row fails
//!   the call and nothing is handed back.

use super::{TransferError, TransferResult};
use crate::model::contact::{join_groups, non_empty, split_groups, Contact};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Header row written by export and skipped by import.
pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Phone Number",
    "Work",
    "Company",
    "Title",
    "Email",
    "Groups",
];

#[derive(Debug, Serialize)]
struct CsvContactRow<'a> {
    name: &'a str,
    phone_number: &'a str,
    work: &'a str,
    company: &'a str,
    title: &'a str,
    email: &'a str,
    groups: String,
}

impl<'a> From<&'a Contact> for CsvContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            name: &contact.name,
            phone_number: contact.phone_number.as_deref().unwrap_or_default(),
            work: contact.work.as_deref().unwrap_or_default(),
            company: contact.company.as_deref().unwrap_or_default(),
            title: contact.title.as_deref().unwrap_or_default(),
            email: contact.email.as_deref().unwrap_or_default(),
            groups: join_groups(&contact.groups),
        }
    }
}

/// Writes `contacts` as CSV to `writer`. Returns the number of data rows.
pub fn write_contacts<W: Write>(writer: W, contacts: &[Contact]) -> TransferResult<usize> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(CSV_HEADERS)?;
    for contact in contacts {
        writer.serialize(CsvContactRow::from(contact))?;
    }
    writer.flush()?;

    Ok(contacts.len())
}

/// Creates (or truncates) `path` and writes `contacts` to it.
pub fn export_contacts(path: &Path, contacts: &[Contact]) -> TransferResult<usize> {
    let file = File::create(path)?;
    write_contacts(file, contacts)
}

/// Decodes every data row from `reader`, skipping the header row.
///
/// Rows carry raw values: empty cells become `None`, and the groups cell is
/// split on commas. A row with an empty name is returned as-is so the caller
/// can decide what to do with it.
///
/// # Errors
/// - `TransferError::MalformedRow` when a row has fewer than seven cells.
/// - `TransferError::Csv` when the input cannot be decoded.
pub fn read_contacts<R: Read>(reader: R) -> TransferResult<Vec<Contact>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut contacts = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        contacts.push(contact_from_record(&record)?);
    }

    Ok(contacts)
}

/// Opens `path` and decodes it with `read_contacts`.
pub fn import_contacts(path: &Path) -> TransferResult<Vec<Contact>> {
    let file = File::open(path)?;
    read_contacts(file)
}

fn contact_from_record(record: &StringRecord) -> TransferResult<Contact> {
    if record.len() < CSV_HEADERS.len() {
        return Err(TransferError::MalformedRow {
            line: record.position().map_or(0, |position| position.line()),
            expected: CSV_HEADERS.len(),
            found: record.len(),
        });
    }

    let cell = |index: usize| non_empty(record.get(index));
    Ok(Contact {
        name: record.get(0).unwrap_or_default().to_string(),
        phone_number: cell(1),
        work: cell(2),
        company: cell(3),
        title: cell(4),
        email: cell(5),
        groups: split_groups(record.get(6).unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        Contact {
            phone_number: Some("111".to_string()),
            email: Some("a@x.com".to_string()),
            groups: vec!["work".to_string(), "vip".to_string()],
            ..Contact::new("Alice")
        }
    }

    #[test]
    fn export_writes_header_and_quoted_groups() {
        let mut buffer = Vec::new();
        let written = write_contacts(&mut buffer, &[sample()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            text,
            "Name,Phone Number,Work,Company,Title,Email,Groups\n\
             Alice,111,,,,a@x.com,\"work,vip\"\n"
        );
    }

    #[test]
    fn empty_export_still_has_header() {
        let mut buffer = Vec::new();
        assert_eq!(write_contacts(&mut buffer, &[]).unwrap(), 0);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Name,Phone Number,Work,Company,Title,Email,Groups\n"
        );
    }

    #[test]
    fn read_decodes_exported_rows() {
        let mut buffer = Vec::new();
        write_contacts(&mut buffer, &[sample(), Contact::new("Bob")]).unwrap();

        let contacts = read_contacts(buffer.as_slice()).unwrap();
        assert_eq!(contacts, vec![sample(), Contact::new("Bob")]);
    }

    #[test]
    fn short_row_is_malformed() {
        let input = "Name,Phone Number,Work,Company,Title,Email,Groups\n\
                     Alice,111,,,,a@x.com,work\n\
                     Bob,222\n";

        let err = read_contacts(input.as_bytes()).unwrap_err();
        match err {
            TransferError::MalformedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 7);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_cells_are_read_as_absent() {
        let input = "Name,Phone Number,Work,Company,Title,Email,Groups\n\
                     Alice, ,Ops,  ,,a@x.com, \n";

        let contacts = read_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts[0].phone_number, None);
        assert_eq!(contacts[0].work.as_deref(), Some("Ops"));
        assert_eq!(contacts[0].company, None);
        assert!(contacts[0].groups.is_empty());
    }

    #[test]
    fn extra_cells_are_ignored() {
        let input = "Name,Phone Number,Work,Company,Title,Email,Groups\n\
                     Alice,111,,,,,,trailing\n";

        let contacts = read_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts[0].phone_number.as_deref(), Some("111"));
        assert!(contacts[0].groups.is_empty());
    }
}
