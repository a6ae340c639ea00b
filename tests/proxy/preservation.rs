//! Integration tests for saving: preservation of unrelated lines and round-trip stability.
//!
//! Tests cover:
//! - Unrelated APT options kept verbatim and in order
//! - CRLF and unterminated lines
//! - Byte-stable re-saving
//! - Backups taken before each save

#![cfg(test)]

use std::fs;
use std::path::Path;

use apt_proxy_editor::proxy::{ConfTarget, ProxyStore, SaveError};

/// What: Load `path` in a writable session, save it unchanged, and return the new content.
///
/// Inputs:
/// - `path`: Existing configuration file.
///
/// Output:
/// - File content after the save.
fn resave(path: &Path) -> String {
    let mut store = ProxyStore::new(ConfTarget::with_access(path, true));
    store.load();
    store.save(|_| true).unwrap();
    fs::read_to_string(path).unwrap()
}

#[test]
/// What: Unrelated lines stay in order, entries move below them.
///
/// Inputs:
/// - Options, a comment, a named directive, a commented directive and a block option.
///
/// Output:
/// - Options first, one separator, the named block, a blank line, the disabled entry.
fn integration_unrelated_lines_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(
        &path,
        "// APT options\n\
         APT::Install-Recommends \"false\";\n\
         ## APT Proxy Editor Name: Office\n\
         Acquire::HTTP::Proxy \"http://office:3128\";\n\
         Acquire::Retries \"5\";\n\
         # Acquire::FTP::Proxy \"ftp://old\";\n\
         Dpkg::Options { \"--force-confold\"; };\n",
    )
    .unwrap();

    let saved = resave(&path);
    assert_eq!(
        saved,
        "// APT options\n\
         APT::Install-Recommends \"false\";\n\
         Acquire::Retries \"5\";\n\
         Dpkg::Options { \"--force-confold\"; };\n\
         \n\
         ## APT Proxy Editor Name: Office\n\
         Acquire::HTTP::Proxy \"http://office:3128\";\n\
         \n\
         # Acquire::FTP::Proxy \"ftp://old\";\n"
    );
    assert_eq!(resave(&path), saved);
}

#[test]
/// What: CRLF terminators on preserved lines survive; entries are written with LF.
fn integration_crlf_lines_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, "APT::Foo \"1\";\r\nAcquire::HTTP::Proxy \"http://p\";\r\n").unwrap();
    let saved = resave(&path);
    assert_eq!(saved, "APT::Foo \"1\";\r\n\nAcquire::HTTP::Proxy \"http://p\";\n");
    assert_eq!(resave(&path), saved);
}

#[test]
/// What: An unterminated last preserved line gets a newline before the separator.
fn integration_unterminated_last_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, "Acquire::HTTP::Proxy \"http://p\";\nAPT::Foo \"1\";").unwrap();
    let saved = resave(&path);
    assert_eq!(saved, "APT::Foo \"1\";\n\nAcquire::HTTP::Proxy \"http://p\";\n");
    assert_eq!(resave(&path), saved);
}

#[test]
/// What: Malformed directive-shaped lines are kept, not dropped.
///
/// Inputs:
/// - A malformed SOCKS line and a valid HTTP directive.
///
/// Output:
/// - Malformed line preserved verbatim above the separator.
fn integration_malformed_line_survives_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(
        &path,
        "Acquire::SOCKS::Proxy BADSYNTAX\nAcquire::HTTP::Proxy \"http://p\";\n",
    )
    .unwrap();
    assert_eq!(
        resave(&path),
        "Acquire::SOCKS::Proxy BADSYNTAX\n\nAcquire::HTTP::Proxy \"http://p\";\n"
    );
}

#[test]
/// What: Every save is preceded by a `pre_manual_save` backup of the old content.
fn integration_save_backs_up_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    let original = "Acquire::FTP::Proxy \"ftp://f\";\nAPT::Foo \"1\";\n";
    fs::write(&path, original).unwrap();

    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    store.load();
    let report = store.save(|_| false).unwrap();
    let backup = report.backup.unwrap();
    assert!(
        backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("apt.conf.pre_manual_save.")
    );
    assert_eq!(backup.parent(), path.parent());
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
}

#[test]
/// What: Saving into a missing file creates it without a backup.
fn integration_save_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    store.load();
    let http = store.entries()[0].id;
    let mut draft = apt_proxy_editor::proxy::EntryDraft::from_entry(&store.entries()[0]);
    draft.target = "http://new:3128".into();
    draft.enabled = true;
    store.update(http, &draft).unwrap();
    let report = store.save(|_| false).unwrap();
    assert_eq!(report.backup, None);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Acquire::HTTP::Proxy \"http://new:3128\";\n"
    );
}

#[cfg(unix)]
#[test]
/// What: A failing backup lets the caller abort; the file is then untouched.
///
/// Inputs:
/// - The configuration path is a directory, so neither read nor copy works.
///
/// Output:
/// - `SaveError::Read` since the preserved lines cannot be recovered.
fn integration_unreadable_target_refuses_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::create_dir(&path).unwrap();
    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    store.load();
    assert!(matches!(store.save(|_| true), Err(SaveError::Read { .. })));
    assert!(path.is_dir());
}
