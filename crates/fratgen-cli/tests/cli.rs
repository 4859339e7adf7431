//! Integration tests for the fratgen binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("fratgen")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("context"));
}

#[test]
fn extract_contract_from_raw_text() {
    let file = write_temp(
        "BETWEEN\nABC A/S\nSome Street 12\n1000 København\nCVR: 12345678\n\
         With effect from 1 August 2022, the Employee is employed.",
    );

    Command::cargo_bin("fratgen")
        .unwrap()
        .args(["extract", "--raw-text", "--kind", "contract"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""C_CoRegCVR": "12345678""#))
        .stdout(predicate::str::contains(r#""C_Name": "ABC A/S""#))
        .stdout(predicate::str::contains(r#""EmploymentStart": "2022-08-01""#));
}

#[test]
fn extract_payslip_from_raw_text() {
    let file = write_temp("Fra: 01-01-2025 Til: 31-01-2025\nFast månedsløn 36.500,00");

    Command::cargo_bin("fratgen")
        .unwrap()
        .args(["extract", "--raw-text", "--kind", "payslip", "--format", "text"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MonthlySalary"))
        .stdout(predicate::str::contains("36500"))
        .stdout(predicate::str::contains("2025-01-31"));
}

#[test]
fn extract_missing_input_fails() {
    Command::cargo_bin("fratgen")
        .unwrap()
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_path_reports_location() {
    Command::cargo_bin("fratgen")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
