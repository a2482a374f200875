//! Integration tests for the ziptree binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use tempfile::TempDir;
use zip::ZipArchive;

fn ziptree_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("ziptree");
    cmd.env_remove("source_path")
        .env_remove("destination")
        .env_remove("verbose");
    cmd
}

fn project() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    let proj = temp.path().join("proj");
    fs::create_dir_all(proj.join("sub")).unwrap();
    fs::write(proj.join("a.txt"), b"alpha").unwrap();
    fs::write(proj.join("sub/b.txt"), b"bravo").unwrap();
    temp
}

#[test]
fn test_version_flag() {
    ziptree_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ziptree"));
}

#[test]
fn test_builds_archive_from_environment() {
    let temp = project();

    ziptree_cmd()
        .env("source_path", temp.path().join("proj"))
        .env("destination", temp.path().join("out/result"))
        .assert()
        .success();

    let archive_path = temp.path().join("out/result.zip");
    assert!(archive_path.is_file());

    let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.txt", "sub/", "sub/b.txt"]);
}

#[test]
fn test_builds_archive_from_flags() {
    let temp = project();

    ziptree_cmd()
        .arg("--source-path")
        .arg(temp.path().join("proj/a.txt"))
        .arg("--destination")
        .arg(temp.path().join("single.zip"))
        .assert()
        .success();

    let archive_path = temp.path().join("single.zip");
    let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert_eq!(names, vec!["a.txt/a.txt"]);
    assert!(!temp.path().join("single.zip.zip").exists());
}

#[test]
fn test_overwrites_existing_archive() {
    let temp = project();
    let archive_path = temp.path().join("result.zip");
    fs::write(&archive_path, b"stale").unwrap();

    ziptree_cmd()
        .env("source_path", temp.path().join("proj"))
        .env("destination", &archive_path)
        .assert()
        .success();

    assert!(ZipArchive::new(File::open(&archive_path).unwrap()).is_ok());
}

#[test]
fn test_missing_source_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    ziptree_cmd()
        .env("source_path", temp.path().join("missing"))
        .env("destination", temp.path().join("result"))
        .assert()
        .failure()
        .code(1);

    assert!(!temp.path().join("result.zip").exists());
}

#[test]
fn test_missing_configuration_fails() {
    ziptree_cmd().assert().failure();
}
