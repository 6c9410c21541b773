//! Integration tests for zipmover-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn zipmover_cmd() -> Command {
    cargo_bin_cmd!("zipmover")
}

/// Creates `src/hello.txt` and `src/nested/foo.md` under a fresh temp dir.
fn source_fixture() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("hello.txt"), "Hello World").unwrap();
    fs::write(src.join("nested/foo.md"), "Foo Bar").unwrap();
    (temp, src)
}

#[test]
fn test_version_flag() {
    zipmover_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipmover"));
}

#[test]
fn test_help_flag() {
    zipmover_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verified ZIP archive"));
}

#[test]
fn test_move_help() {
    zipmover_cmd()
        .arg("move")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pack a directory"));
}

#[test]
fn test_move_copies_tree() {
    let (temp, src) = source_fixture();
    let dest = temp.path().join("dest");

    zipmover_cmd()
        .arg("move")
        .arg(&src)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files extracted:  2"))
        .stdout(predicate::str::contains("SHA-256"));

    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).unwrap(),
        "Hello World"
    );
    assert_eq!(
        fs::read_to_string(dest.join("nested/foo.md")).unwrap(),
        "Foo Bar"
    );
    // Source is left untouched.
    assert!(src.join("hello.txt").exists());
}

#[test]
fn test_move_json_output() {
    let (temp, src) = source_fixture();
    let dest = temp.path().join("dest");

    let output = zipmover_cmd()
        .arg("--json")
        .arg("move")
        .arg(&src)
        .arg(&dest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "move");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["files_extracted"], 2);
    assert_eq!(json["data"]["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_move_keep_archive() {
    let (temp, src) = source_fixture();
    let dest = temp.path().join("dest");
    let archive = temp.path().join("kept.zip");

    zipmover_cmd()
        .arg("move")
        .arg(&src)
        .arg(&dest)
        .arg("--archive")
        .arg(&archive)
        .arg("--keep-archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive kept"));

    assert!(archive.exists());
    let data = fs::read(&archive).unwrap();
    assert_eq!(&data[0..4], b"PK\x03\x04");
}

#[test]
fn test_move_disposes_explicit_archive() {
    let (temp, src) = source_fixture();
    let dest = temp.path().join("dest");
    let archive = temp.path().join("transient.zip");

    zipmover_cmd()
        .arg("--quiet")
        .arg("move")
        .arg(&src)
        .arg(&dest)
        .arg("--archive")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!archive.exists());
    assert!(dest.join("hello.txt").exists());
}

#[test]
fn test_move_exclude_pattern() {
    let (temp, src) = source_fixture();
    fs::write(src.join("debug.log"), "noise").unwrap();
    let dest = temp.path().join("dest");

    zipmover_cmd()
        .arg("move")
        .arg(&src)
        .arg(&dest)
        .arg("-x")
        .arg("*.log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files skipped:    1"));

    assert!(!dest.join("debug.log").exists());
    assert!(dest.join("hello.txt").exists());
}

#[test]
fn test_move_missing_source() {
    let temp = TempDir::new().expect("failed to create temp dir");

    zipmover_cmd()
        .arg("move")
        .arg(temp.path().join("nope"))
        .arg(temp.path().join("dest"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory not found"));
}

#[test]
fn test_move_source_is_file() {
    let (temp, src) = source_fixture();

    zipmover_cmd()
        .arg("move")
        .arg(src.join("hello.txt"))
        .arg(temp.path().join("dest"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_keep_archive_requires_archive_flag() {
    let (temp, src) = source_fixture();

    zipmover_cmd()
        .arg("move")
        .arg(&src)
        .arg(temp.path().join("dest"))
        .arg("--keep-archive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--archive"));
}

#[test]
fn test_completion_bash() {
    zipmover_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipmover"));
}
