use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn contactvault(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("contactvault").unwrap();
    cmd.current_dir(dir)
        .env_remove("CONTACTVAULT_DB")
        .env_remove("CONTACTVAULT_CSV")
        .env_remove("CONTACTVAULT_LOG_DIR")
        .env_remove("CONTACTVAULT_LOG_LEVEL");
    cmd
}

#[test]
fn contacts_persist_between_sessions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    contactvault(dir.path())
        .write_stdin("1\nAlice\n111\n\n\n\na@x.com\nwork,vip\n8\n")
        .assert()
        .success()
        .stdout(contains("Contact added/updated: Alice"))
        .stdout(contains("Exiting ContactVault."));

    assert!(dir.path().join("Contacts.db").exists());

    contactvault(dir.path())
        .write_stdin("4\n8\n")
        .assert()
        .success()
        .stdout(contains("Contact List:"))
        .stdout(contains("Name: Alice"))
        .stdout(contains("Email: a@x.com"))
        .stdout(contains("Groups: work,vip"));

    Ok(())
}

#[test]
fn export_then_bulk_add_into_fresh_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let export_path = dir.path().join("out.csv");

    contactvault(dir.path())
        .arg("--db")
        .arg("first.db")
        .arg("--csv")
        .arg(&export_path)
        .write_stdin("1\nAlice\n111\n\n\n\n\nwork, vip\n1\nBob\n222\n\n\n\n\n\n6\n8\n")
        .assert()
        .success()
        .stdout(contains("Contacts exported to CSV:"));

    let exported = fs::read_to_string(&export_path)?;
    assert!(exported.starts_with("Name,Phone Number,Work,Company,Title,Email,Groups\n"));
    assert!(exported.contains("Alice,111,,,,,\"work,vip\""));

    contactvault(dir.path())
        .arg("--db")
        .arg("second.db")
        .write_stdin(format!("7\n{}\n3\nAlice\n8\n", export_path.display()))
        .assert()
        .success()
        .stdout(contains("Bulk contacts added from"))
        .stdout(contains("Added: 2, updated: 0, kept: 0, skipped without name: 0"))
        .stdout(contains("Groups: work,vip"));

    Ok(())
}

#[test]
fn bulk_add_from_missing_file_reports_and_continues() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    contactvault(dir.path())
        .write_stdin("7\nnope.csv\n4\n8\n")
        .assert()
        .success()
        .stdout(contains("Error: file nope.csv not found"))
        .stdout(contains("No contacts available."));

    Ok(())
}

#[test]
fn log_dir_receives_rolling_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let log_dir = dir.path().join("logs");

    contactvault(dir.path())
        .arg("--log-dir")
        .arg(&log_dir)
        .arg("--log-level")
        .arg("info")
        .write_stdin("8\n")
        .assert()
        .success();

    let entries = fs::read_dir(&log_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert!(
        entries.iter().any(|name| name.starts_with("contactvault")),
        "log files: {entries:?}"
    );

    Ok(())
}

#[test]
fn unsupported_log_level_fails_fast() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    contactvault(dir.path())
        .arg("--log-dir")
        .arg(dir.path().join("logs"))
        .arg("--log-level")
        .arg("loud")
        .write_stdin("8\n")
        .assert()
        .failure()
        .stderr(contains("unsupported log level"));

    Ok(())
}
