use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_LINES: &str = concat!(
    r#"{"Index Number":"1000012","Name":"MOHOMED RISHVAN FATHIMA RUMANA","Z-Score":"1.0128","District Rank":"1968","Island Rank":"10177","NIC Number":"200564002042","Subjects":{"ECONOMICS":"B","BUSINESS STUDIES":"C","ACCOUNTING":"S"}}"#,
    "\n\n",
    r#"{"Index Number":"1000020","Name":"AHAMED LEBBE MOHAMED RIFKHAN"}"#,
    "\n",
    "this line is not json\n",
);

/// Command bound to a private SQLite database.
fn exam_results(db_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("exam-results").unwrap();
    cmd.env("EXAM_RESULTS_DB_PATH", db_dir.join("nested").join("results.db"))
        .env_remove("DATABASE_URL")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("exam-results").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search and look up student examination results"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("exam-results").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("port").and(predicate::str::contains("5000")));
}

#[test]
fn test_import_then_search_and_get() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("students.jsonl");
    std::fs::write(&input, SAMPLE_LINES).unwrap();

    exam_results(dir.path())
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 of 3 records (1 failed)"));

    exam_results(dir.path())
        .args(["search", "rishvan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"index_number\": \"1000012\""))
        .stdout(predicate::str::contains("1000020").not());

    exam_results(dir.path())
        .args(["get", "1000012"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ECONOMICS\": \"B\""));

    exam_results(dir.path())
        .args(["get", "1000020"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"z_score\": \"-\""));

    exam_results(dir.path())
        .args(["get", "9999999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student not found: 9999999"));
}

#[test]
fn test_search_rejects_blank_phrase() {
    let dir = TempDir::new().unwrap();
    exam_results(dir.path())
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_seed_sample_is_searchable() {
    let dir = TempDir::new().unwrap();
    exam_results(dir.path())
        .arg("seed-sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 7 sample records"));

    exam_results(dir.path())
        .args(["search", "RISHVAN", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000012"));
}

#[test]
fn test_add_user_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    exam_results(dir.path())
        .args(["add-user", "registrar", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user registrar"));

    exam_results(dir.path()).args(["add-user", "registrar", "other"]).assert().failure();
}
