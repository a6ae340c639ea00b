//! Integration tests for the load scenarios of a proxy configuration file.
//!
//! Tests cover:
//! - Empty and missing files
//! - Named, unnamed and commented directives
//! - Whitespace auto-correction and its backup
//! - Malformed directive-shaped lines

#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};

use apt_proxy_editor::proxy::{ConfTarget, Diagnostic, MatchMode, ProxyKind, ProxyStore};

/// What: Write `content` to a fresh `apt.conf` and load it.
///
/// Inputs:
/// - `content`: File content.
/// - `writable`: Writability handed to the session.
///
/// Output:
/// - Temp dir guard, file path and loaded store.
///
/// Details:
/// - The guard must outlive the store so the directory stays in place.
fn load(content: &str, writable: bool) -> (tempfile::TempDir, PathBuf, ProxyStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, content).unwrap();
    let mut store = ProxyStore::new(ConfTarget::with_access(&path, writable));
    store.load();
    (dir, path, store)
}

/// Names of files in `dir` other than `apt.conf`.
fn siblings(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n != "apt.conf")
        .collect();
    names.sort();
    names
}

#[test]
/// What: An empty file yields the four placeholders and nothing else.
///
/// Inputs:
/// - Empty `apt.conf`.
///
/// Output:
/// - HTTP, HTTPS, FTP, SOCKS placeholders; disabled, empty target and label.
fn integration_empty_file_gives_placeholders() {
    let (_dir, _path, store) = load("", true);
    let kinds: Vec<ProxyKind> = store.entries().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, ProxyKind::ALL.to_vec());
    for e in store.entries() {
        assert!(!e.enabled);
        assert!(e.target.is_empty());
        assert!(e.label.is_empty());
    }
}

#[test]
/// What: A plain enabled directive becomes one unnamed entry.
///
/// Inputs:
/// - `Acquire::HTTP::Proxy "http://proxy:8080";`
///
/// Output:
/// - Enabled HTTP entry, no label, placeholders for the other three kinds.
fn integration_plain_directive() {
    let (_dir, _path, store) = load("Acquire::HTTP::Proxy \"http://proxy:8080\";\n", true);
    let http: Vec<_> = store
        .entries()
        .iter()
        .filter(|e| e.kind == ProxyKind::Http)
        .collect();
    assert_eq!(http.len(), 1);
    assert!(http[0].enabled);
    assert_eq!(http[0].target, "http://proxy:8080");
    assert_eq!(http[0].label, "");
    assert_eq!(store.entries().len(), 4);
}

#[test]
/// What: Keywords and kinds are matched case-insensitively and canonicalized.
///
/// Inputs:
/// - Lower-case keyword and kind, mixed-case annotation marker.
///
/// Output:
/// - HTTPS entry named `Lab`, rendered back in canonical spelling.
fn integration_case_insensitive_match() {
    let (_dir, _path, store) = load(
        "## apt proxy editor name: Lab\nacquire::https::proxy \"https://lab\";\n",
        true,
    );
    let e = &store.entries()[0];
    assert_eq!(e.kind, ProxyKind::Https);
    assert_eq!(e.label, "Lab");
    assert_eq!(
        e.to_conf_lines(),
        vec![
            "## APT Proxy Editor Name: Lab".to_string(),
            "Acquire::HTTPS::Proxy \"https://lab\";".to_string(),
        ]
    );
}

#[test]
/// What: A blank line between an annotation and its directive drops the name.
///
/// Inputs:
/// - Annotation, blank line, FTP directive.
///
/// Output:
/// - FTP entry with an empty label and no diagnostics.
fn integration_blank_line_breaks_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(
        &path,
        "## APT Proxy Editor Name: Lost\n\nAcquire::FTP::Proxy \"ftp://f\";\n",
    )
    .unwrap();
    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    let report = store.load();
    assert!(report.diagnostics.is_empty());
    assert_eq!(store.entries()[0].kind, ProxyKind::Ftp);
    assert_eq!(store.entries()[0].label, "");
}

#[test]
/// What: Whitespace before `;` is corrected once, with a backup, then parsed strictly.
///
/// Inputs:
/// - Named HTTPS directive with a space before `;` in a writable file.
///
/// Output:
/// - Corrected file, one `apt.conf.pre_whitespace_correction.*` backup,
///   enabled HTTPS entry `Office`, nothing further on reload.
fn integration_auto_correction_with_backup() {
    let original = "## APT Proxy Editor Name: Office\nAcquire::HTTPS::Proxy \"https://p:443\" ;";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, original).unwrap();

    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    let report = store.load();
    assert!(report.corrected);
    assert_eq!(store.mode(), MatchMode::Strict);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "## APT Proxy Editor Name: Office\nAcquire::HTTPS::Proxy \"https://p:443\";"
    );
    let backups = siblings(dir.path());
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("apt.conf.pre_whitespace_correction."));
    // Timestamp part is YYYYMMDD-HHMMSS.
    let stamp = backups[0].rsplit('.').next().unwrap();
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "-");

    let e = &store.entries()[0];
    assert_eq!((e.kind, e.enabled), (ProxyKind::Https, true));
    assert_eq!(e.target, "https://p:443");
    assert_eq!(e.label, "Office");

    let again = store.load();
    assert!(!again.corrected);
    assert_eq!(siblings(dir.path()).len(), 1);
}

#[test]
/// What: A read-only file is never corrected but still parses leniently.
fn integration_readonly_file_not_corrected() {
    let original = "Acquire::SOCKS::Proxy \"socks5h://s\" ;  \n";
    let (dir, path, store) = load(original, false);
    assert_eq!(store.mode(), MatchMode::Lenient);
    assert_eq!(store.entries()[0].kind, ProxyKind::Socks);
    assert_eq!(store.entries()[0].target, "socks5h://s");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(siblings(dir.path()).is_empty());
}

#[test]
/// What: A commented directive is a disabled entry.
fn integration_commented_directive_is_disabled() {
    let (_dir, _path, store) = load("# Acquire::FTP::Proxy \"ftp://x\";\n", true);
    let e = &store.entries()[0];
    assert_eq!(e.kind, ProxyKind::Ftp);
    assert!(!e.enabled);
    assert_eq!(e.target, "ftp://x");
}

#[test]
/// What: A malformed directive is reported and the kind still gets a placeholder.
///
/// Inputs:
/// - `Acquire::SOCKS::Proxy BADSYNTAX` after an unrelated option.
///
/// Output:
/// - One diagnostic for line 2 quoting the line; SOCKS placeholder present.
fn integration_malformed_line_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, "APT::Get::Assume-Yes \"true\";\nAcquire::SOCKS::Proxy BADSYNTAX\n").unwrap();
    let mut store = ProxyStore::new(ConfTarget::with_access(&path, true));
    let report = store.load();
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::MalformedLine {
            line_no: 2,
            excerpt: "Acquire::SOCKS::Proxy BADSYNTAX".to_string(),
        }]
    );
    assert_eq!(
        report.report().unwrap(),
        "Warning: Possible malformed proxy line 2: 'Acquire::SOCKS::Proxy BADSYNTAX...'"
    );
    assert!(
        store
            .entries()
            .iter()
            .any(|e| e.kind == ProxyKind::Socks && e.is_placeholder())
    );
    assert!(store.entries().iter().all(|e| e.is_placeholder()));
}

#[test]
/// What: Long malformed lines are quoted up to 70 characters.
fn integration_diagnostic_excerpt_is_truncated() {
    let long = format!("Acquire::HTTP::Proxy {}", "x".repeat(100));
    let (_dir, _path, mut store) = load("", true);
    fs::write(store.path(), format!("{long}\n")).unwrap();
    let report = store.load();
    match report.diagnostics.as_slice() {
        [Diagnostic::MalformedLine { line_no: 1, excerpt }] => {
            assert_eq!(excerpt.chars().count(), 70);
            assert!(long.starts_with(excerpt.as_str()));
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
}

#[test]
/// What: A missing file is not an error and is not created by loading.
fn integration_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    let mut store = ProxyStore::new(ConfTarget::probe(&path));
    assert!(store.writable());
    let report = store.load();
    assert!(report.diagnostics.is_empty());
    assert_eq!(store.entries().len(), 4);
    assert!(!path.exists());
}
