//! Integration tests for the salary file CLI.
//!
//! These tests run the actual binary on copies of the fixtures in
//! `tests/data` and compare the written file byte for byte.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(filename: &str) -> PathBuf {
    Path::new("tests/data").join(filename)
}

/// Copy a fixture into a fresh temp dir so output lands next to it
fn stage(filename: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join(filename);
    fs::copy(test_data_path(filename), &input).unwrap();
    (dir, input)
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("salary-file").unwrap();
    cmd.env_remove("SALARY_FILE_STRICT");
    cmd
}

#[test]
fn test_sample_a_matches_expected_bytes() {
    let (dir, input) = stage("sample_a.json");
    let output = dir.path().join("sample_a.in.txt");

    command()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("sample_a.in.txt"))
        .stdout(predicate::str::contains("successfully created"));

    let written = fs::read(&output).unwrap();
    let expected = fs::read(test_data_path("expected_a.in.txt")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_sample_b_empty_batch() {
    let (dir, input) = stage("sample_b_empty.json");
    command().arg(&input).assert().success();

    let written = fs::read(dir.path().join("sample_b_empty.in.txt")).unwrap();
    let expected = fs::read(test_data_path("expected_b.in.txt")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_output_is_latin1_with_fixed_width_lines() {
    let (dir, input) = stage("sample_a.json");
    command().arg(&input).assert().success();

    let written = fs::read(dir.path().join("sample_a.in.txt")).unwrap();
    assert!(written.ends_with(b"\n"));
    // Ö is the single byte 0xD6, never a UTF-8 pair
    assert!(written.contains(&0xD6));
    assert!(!written.windows(2).any(|w| w == [0xC3, 0x96]));

    for line in written[..written.len() - 1].split(|b| *b == b'\n') {
        assert_eq!(line.len(), 80);
    }
}

#[test]
fn test_output_option_overrides_path() {
    let (dir, input) = stage("sample_b_empty.json");
    let output = dir.path().join("custom.txt");

    command()
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.txt"));

    assert!(output.exists());
    assert!(!dir.path().join("sample_b_empty.in.txt").exists());
}

#[test]
fn test_missing_field_error() {
    let (dir, input) = stage("sample_c_missing_field.json");

    command()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("sender_bankgiro_number"));

    assert!(!dir.path().join("sample_c_missing_field.in.txt").exists());
}

#[test]
fn test_invalid_amount_names_payment() {
    let (dir, input) = stage("sample_d_invalid_amount.json");

    command()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("payments[1]").and(predicate::str::contains("amount")));

    assert!(!dir.path().join("sample_d_invalid_amount.in.txt").exists());
}

#[test]
fn test_long_account_truncates_by_default() {
    let (dir, input) = stage("sample_e_long_account.json");
    command().arg(&input).assert().success();

    let written = fs::read(dir.path().join("sample_e_long_account.in.txt")).unwrap();
    let text: String = written.iter().map(|b| char::from(*b)).collect();
    let payment = text.lines().nth(1).unwrap();
    assert_eq!(&payment[12..28], "5432109876543210");
}

#[test]
fn test_strict_flag_rejects_long_account() {
    let (dir, input) = stage("sample_e_long_account.json");

    command()
        .arg("--strict")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bank_account"));

    assert!(!dir.path().join("sample_e_long_account.in.txt").exists());
}

#[test]
fn test_strict_env_var() {
    let (_dir, input) = stage("sample_e_long_account.json");

    command()
        .env("SALARY_FILE_STRICT", "1")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds column width 16"));
}

#[test]
fn test_malformed_json_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ \"creation_date\": ").unwrap();

    command()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn test_missing_file_error() {
    command()
        .arg("nonexistent.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    command()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unknown_option_error() {
    command()
        .arg("--verbose")
        .arg("batch.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option"));
}
