//! Integration tests for edit commands run through the command-line layer.
//!
//! Tests cover:
//! - add, edit, enable/disable and remove followed by a save
//! - Validation failures leaving the file untouched
//! - Exit codes for read-only targets and diagnostics

#![cfg(test)]

use std::fs;
use std::path::Path;

use clap::Parser;

use apt_proxy_editor::args::utils::{EXIT_DIAGNOSTICS, EXIT_FAILURE, EXIT_NOT_WRITABLE, EXIT_OK};
use apt_proxy_editor::args::{Args, RunOptions, process_args};
use apt_proxy_editor::settings::Settings;

/// What: Run the CLI against `conf` with `--force`.
///
/// Inputs:
/// - `conf`: Configuration file path.
/// - `argv`: Subcommand and its arguments.
///
/// Output:
/// - Exit code of the command.
///
/// Details:
/// - Settings are the defaults so the host configuration is never read.
fn run(conf: &Path, argv: &[&str]) -> i32 {
    let conf = conf.to_string_lossy().into_owned();
    let mut full = vec!["aptproxy", "--force", "--conf", conf.as_str()];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).unwrap();
    let opts = RunOptions::resolve(&args, &Settings::default());
    process_args(&args, &opts)
}

#[test]
/// What: Full edit cycle: add, rename, disable, enable and remove.
///
/// Inputs:
/// - File with an unrelated option and an enabled HTTP proxy.
///
/// Output:
/// - File content after each step, unrelated option always first.
fn integration_edit_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, "APT::Foo \"1\";\nAcquire::HTTP::Proxy \"http://proxy:8080\";\n").unwrap();

    // Ids: 1 = HTTP, 2..4 = HTTPS/FTP/SOCKS placeholders, 5 = new entry.
    assert_eq!(
        run(&path, &["add", "--kind", "socks", "--target", "socks5h://127.0.0.1:1080", "--label", "Tunnel"]),
        EXIT_OK
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "APT::Foo \"1\";\n\
         \n\
         Acquire::HTTP::Proxy \"http://proxy:8080\";\n\
         ## APT Proxy Editor Name: Tunnel\n\
         Acquire::SOCKS::Proxy \"socks5h://127.0.0.1:1080\";\n"
    );

    // Reloaded: 1 = HTTP, 2 = SOCKS Tunnel, 3..4 = HTTPS/FTP placeholders.
    assert_eq!(run(&path, &["edit", "1", "--label", "Office"]), EXIT_OK);
    assert_eq!(run(&path, &["disable", "2"]), EXIT_OK);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "APT::Foo \"1\";\n\
         \n\
         ## APT Proxy Editor Name: Office\n\
         Acquire::HTTP::Proxy \"http://proxy:8080\";\n\
         \n\
         ## APT Proxy Editor Name: Tunnel\n\
         # Acquire::SOCKS::Proxy \"socks5h://127.0.0.1:1080\";\n"
    );

    assert_eq!(run(&path, &["enable", "2"]), EXIT_OK);
    assert_eq!(run(&path, &["remove", "1"]), EXIT_OK);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "APT::Foo \"1\";\n\
         \n\
         ## APT Proxy Editor Name: Tunnel\n\
         Acquire::SOCKS::Proxy \"socks5h://127.0.0.1:1080\";\n"
    );
}

#[test]
/// What: A second enabled entry of the same kind is rejected and nothing is written.
///
/// Inputs:
/// - Enabled HTTP proxy; `add --kind http --target a`.
///
/// Output:
/// - `EXIT_FAILURE`, file unchanged, no backup created.
fn integration_duplicate_enabled_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    let original = "Acquire::HTTP::Proxy \"http://proxy:8080\";\n";
    fs::write(&path, original).unwrap();
    assert_eq!(run(&path, &["add", "--kind", "http", "--target", "a"]), EXIT_FAILURE);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    // Disabled duplicates are allowed.
    assert_eq!(
        run(&path, &["add", "--kind", "http", "--target", "a", "--disabled"]),
        EXIT_OK
    );
}

#[test]
/// What: Validation errors for labels and targets map to `EXIT_FAILURE`.
fn integration_invalid_drafts_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    fs::write(&path, "").unwrap();
    for argv in [
        &["add", "--kind", "ftp", "--target", "ftp://x", "--label", "## APT Proxy Editor Name: x"][..],
        &["add", "--kind", "ftp"][..],
        &["add", "--kind", "ftp", "--target", "ftp://a b"][..],
        &["enable", "3"][..],
        &["remove", "99"][..],
    ] {
        assert_eq!(run(&path, argv), EXIT_FAILURE, "{argv:?}");
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
/// What: A target whose directory does not exist is reported as not writable.
fn integration_not_writable_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("apt.conf");
    assert_eq!(run(&path, &["add", "--kind", "ftp", "--target", "ftp://x"]), EXIT_NOT_WRITABLE);
    assert!(!path.exists());
    // Listing still works on an absent, read-only target.
    assert_eq!(run(&path, &["list"]), EXIT_OK);
}

#[test]
/// What: `check` reports diagnostics through its exit code; `preview` writes nothing.
///
/// Inputs:
/// - A malformed line and a directive with a space before `;`.
///
/// Output:
/// - `check --no-autofix` exits with `EXIT_DIAGNOSTICS`; `preview` leaves the file as is.
fn integration_check_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apt.conf");
    let original = "Acquire::SOCKS::Proxy BADSYNTAX\nAcquire::HTTP::Proxy \"http://p\" ;\n";
    fs::write(&path, original).unwrap();
    assert_eq!(run(&path, &["preview"]), EXIT_OK);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(run(&path, &["--no-autofix", "check"]), EXIT_DIAGNOSTICS);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(run(&path, &["--json", "list"]), EXIT_OK);
}

#[cfg(unix)]
#[test]
/// What: `check --json` on a file name that is not UTF-8 reports instead of panicking.
///
/// Inputs:
/// - Valid configuration stored as `apt\xff.conf`.
///
/// Output:
/// - `EXIT_OK` from the command.
fn integration_check_json_non_utf8_path() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsString::from_vec(b"apt\xff.conf".to_vec()));
    fs::write(&path, "Acquire::HTTP::Proxy \"http://p\";\n").unwrap();

    let argv: Vec<OsString> = vec![
        "aptproxy".into(),
        "--json".into(),
        "--conf".into(),
        path.clone().into_os_string(),
        "check".into(),
    ];
    let args = Args::try_parse_from(argv).unwrap();
    let opts = RunOptions::resolve(&args, &Settings::default());
    assert_eq!(process_args(&args, &opts), EXIT_OK);
}
