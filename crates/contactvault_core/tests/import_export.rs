use contactvault_core::{Contact, ContactServiceError, ContactStore, ImportReport, CSV_HEADERS};
use std::collections::BTreeSet;
use std::fs;

fn seeded_store() -> ContactStore {
    let store = ContactStore::open_in_memory().unwrap();
    let contacts = [
        Contact {
            phone_number: Some("111".to_string()),
            email: Some("alice@example.com".to_string()),
            groups: vec!["work".to_string(), "vip".to_string()],
            ..Contact::new("Alice")
        },
        Contact {
            company: Some("Acme, Inc.".to_string()),
            title: Some("Buyer".to_string()),
            ..Contact::new("Bob")
        },
        Contact::new("Carol"),
    ];
    for contact in &contacts {
        store.upsert(contact, |_| true).unwrap();
    }
    store
}

fn field_pairs(store: &ContactStore) -> BTreeSet<(String, &'static str, String)> {
    store
        .list()
        .unwrap()
        .iter()
        .flat_map(|contact| {
            contact
                .present_columns()
                .into_iter()
                .map(|(column, value)| (contact.name.clone(), column, value))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn export_writes_fixed_header_and_groups_joined() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Contacts.csv");

    let written = seeded_store().export_all(&path).unwrap();
    assert_eq!(written, 3);

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(CSV_HEADERS.join(",").as_str()));
    assert_eq!(
        lines.next(),
        Some("Alice,111,,,,alice@example.com,\"work,vip\"")
    );
    assert_eq!(lines.next(), Some("Bob,,,\"Acme, Inc.\",Buyer,,"));
    assert_eq!(lines.next(), Some("Carol,,,,,,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn empty_store_round_trips_to_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let source = ContactStore::open_in_memory().unwrap();
    assert_eq!(source.export_all(&path).unwrap(), 0);

    let target = ContactStore::open_in_memory().unwrap();
    let report = target.import_bulk(&path, |_| true).unwrap();
    assert_eq!(report, ImportReport::default());
    assert!(target.list().unwrap().is_empty());
}

#[test]
fn populated_store_round_trips_field_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Contacts.csv");

    let source = seeded_store();
    source.export_all(&path).unwrap();

    let target = ContactStore::open_in_memory().unwrap();
    let report = target.import_bulk(&path, |_| true).unwrap();

    assert_eq!(report.created, 3);
    assert_eq!(report.written(), 3);
    assert_eq!(field_pairs(&target), field_pairs(&source));
    assert_eq!(target.find("Alice").unwrap().groups, vec!["work", "vip"]);
}

#[test]
fn reimport_into_same_store_consults_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Contacts.csv");

    let store = seeded_store();
    store.export_all(&path).unwrap();

    let mut asked = Vec::new();
    let report = store
        .import_bulk(&path, |existing| {
            asked.push(existing.name.clone());
            existing.name != "Bob"
        })
        .unwrap();

    assert_eq!(asked, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(report.replaced, 2);
    assert_eq!(report.declined, 1);
}

#[test]
fn import_missing_file_is_file_not_found_and_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let store = seeded_store();
    let before = store.list().unwrap();

    let err = store.import_bulk(&path, |_| true).unwrap_err();
    assert!(matches!(err, ContactServiceError::FileNotFound(ref missing) if missing == &path));
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn malformed_row_aborts_import_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "Name,Phone Number,Work,Company,Title,Email,Groups\n\
         Dave,444,,,,,\n\
         Eve,555\n",
    )
    .unwrap();

    let store = ContactStore::open_in_memory().unwrap();
    let err = store.import_bulk(&path, |_| true).unwrap_err();

    match err {
        ContactServiceError::ImportProcessing { path: failed, reason } => {
            assert_eq!(failed, path);
            assert!(reason.contains("line 3"), "reason was: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn rows_without_name_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(
        &path,
        "Name,Phone Number,Work,Company,Title,Email,Groups\n\
         ,444,,,,,\n\
         Frank,666,,,,,\" friends , gym \"\n",
    )
    .unwrap();

    let store = ContactStore::open_in_memory().unwrap();
    let report = store.import_bulk(&path, |_| true).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.created, 1);
    assert_eq!(store.find("Frank").unwrap().groups, vec!["friends", "gym"]);
}

#[test]
fn export_to_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("Contacts.csv");

    let err = seeded_store().export_all(&path).unwrap_err();
    assert!(matches!(err, ContactServiceError::Io { .. }));
}
