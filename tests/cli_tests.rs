use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn report_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("annual-report"))
}

/// Temp dir with an initialized config (sample company and `example` ledger).
fn initialized() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("report-config");
    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
    (temp_dir, config_path)
}

fn cfg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help() {
    report_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Statutory annual report generator"));
}

#[test]
fn test_version() {
    report_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("annual-report"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("report-config");

    report_cmd()
        .args(["-C", cfg(&config_path), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized annual-report config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("ledger").join("example.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let (_temp, config_path) = initialized();

    report_cmd()
        .args(["-C", cfg(&config_path), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    report_cmd()
        .args(["-C", cfg(&config_path), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status_lists_owners() {
    let (_temp, config_path) = initialized();

    report_cmd()
        .args(["-C", cfg(&config_path), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Technologies Private Limited"))
        .stdout(predicate::str::contains("Owners:           example"));
}

#[test]
fn test_sections_in_statutory_order() {
    let output = report_cmd().arg("sections").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0].trim(), "1. Cover");
    assert_eq!(lines[4].trim(), "5. Statement of Profit and Loss");
    assert_eq!(lines[11].trim(), "12. Independent Auditor's Report");
}

#[test]
fn test_summary_shows_aggregate() {
    let (_temp, config_path) = initialized();

    report_cmd()
        .args(["-C", cfg(&config_path), "summary", "2024-25", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500,000"))
        .stdout(predicate::str::contains("350,000"))
        .stdout(predicate::str::contains("87,500"))
        .stdout(predicate::str::contains("262,500"))
        .stdout(predicate::str::contains("Balance sheet difference").not());
}

#[test]
fn test_generate_writes_pdf() {
    let (temp, config_path) = initialized();
    let pdf = temp.path().join("out").join("report.pdf");

    report_cmd()
        .args([
            "-C",
            cfg(&config_path),
            "generate",
            "FY2024-25",
            "example",
            "-o",
            pdf.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"));

    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!temp.path().join("out").join("report.failed.txt").exists());
}

#[test]
fn test_generate_default_output_path() {
    let (_temp, config_path) = initialized();
    let config_file = config_path.join("config.toml");
    let config = fs::read_to_string(&config_file).unwrap().replace(
        r#"output_dir = "~/.annual-report/output""#,
        r#"output_dir = "output""#,
    );
    fs::write(&config_file, config).unwrap();

    report_cmd()
        .args(["-C", cfg(&config_path), "generate", "2024", "example"])
        .assert()
        .success();

    assert!(config_path
        .join("output")
        .join("example-annual-report-FY2024-25.pdf")
        .exists());
}

#[test]
fn test_generate_invalid_fiscal_year() {
    let (_temp, config_path) = initialized();

    report_cmd()
        .args(["-C", cfg(&config_path), "generate", "2024-27", "example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid fiscal year"));
}

#[test]
fn test_generate_missing_ledger_is_data_unavailable() {
    let (temp, config_path) = initialized();
    let pdf = temp.path().join("ghost.pdf");

    report_cmd()
        .args([
            "-C",
            cfg(&config_path),
            "generate",
            "2024-25",
            "ghost",
            "-o",
            pdf.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Financial data unavailable"));

    assert!(!pdf.exists());
}

#[test]
fn test_generate_strict_balance_rejects_mismatch() {
    let (temp, config_path) = initialized();

    let config_file = config_path.join("config.toml");
    let config = fs::read_to_string(&config_file)
        .unwrap()
        .replace("strict_balance = false", "strict_balance = true");
    fs::write(&config_file, config).unwrap();

    let ledger_file = config_path.join("ledger").join("example.toml");
    let ledger = fs::read_to_string(&ledger_file)
        .unwrap()
        .replace("amount = 104000", "amount = 99000");
    fs::write(&ledger_file, ledger).unwrap();

    let pdf = temp.path().join("strict.pdf");
    report_cmd()
        .args([
            "-C",
            cfg(&config_path),
            "generate",
            "2024-25",
            "example",
            "-o",
            pdf.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not balance"));

    assert!(!pdf.exists());
}

#[test]
fn test_generate_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    report_cmd()
        .args(["-C", cfg(&config_path), "generate", "2024-25", "example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run 'annual-report init'"));
}
