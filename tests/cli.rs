use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const INPUT: &str = "3\n1 2 3\n0 0 0\n5\n";

struct Case {
    dir: tempfile::TempDir,
}

impl Case {
    fn new(input: &str, reference: &str, submitted: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("input.txt"), input).expect("write input");
        fs::write(dir.path().join("output.txt"), reference).expect("write reference");
        fs::write(dir.path().join("user.txt"), submitted).expect("write submission");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn paths(&self) -> [PathBuf; 3] {
        [
            self.path("input.txt"),
            self.path("output.txt"),
            self.path("user.txt"),
        ]
    }
}

fn checker() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("checker").expect("checker binary");
    cmd.env_remove("RUST_LOG").env_remove("CHECKER_STRICT_INPUT");
    cmd
}

#[test]
fn accepts_matching_max() {
    let case = Case::new(INPUT, "5\n", "5\n");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("1.0\n")
        .stderr(predicate::str::contains("Output correct"));
}

#[test]
fn rejects_wrong_max_with_both_values() {
    let case = Case::new(INPUT, "5\n", "4\n");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("Expected max=5 but got 4"));
}

#[test]
fn accepts_matching_index() {
    let case = Case::new(INPUT, "5 2\n", "5 2\n");
    checker().args(case.paths()).assert().success().stdout("1.0\n");
}

#[test]
fn rejects_wrong_index() {
    let case = Case::new(INPUT, "5 2\n", "5 3\n");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("Expected index=2 but got 3"));
}

#[test]
fn rejects_missing_index() {
    let case = Case::new(INPUT, "5 2\n", "5\n");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("Expected an index"));
}

#[test]
fn rejects_empty_submission() {
    let case = Case::new(INPUT, "5\n", "");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("missing first number"));
}

#[test]
fn too_few_arguments_is_a_usage_error() {
    let case = Case::new(INPUT, "5\n", "5\n");
    let [input, reference, _] = case.paths();
    checker()
        .arg(input)
        .arg(reference)
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::function(|stderr: &str| {
            stderr.matches("Usage: checker").count() == 1
        }));
    checker().assert().success().stdout("0.0\n");
}

#[test]
fn help_is_not_a_verdict() {
    checker()
        .arg("--help")
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_file_rejects() {
    let case = Case::new(INPUT, "5\n", "5\n");
    let [input, reference, _] = case.paths();
    checker()
        .arg(input)
        .arg(reference)
        .arg(case.path("does-not-exist.txt"))
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("File open error"));
}

#[test]
fn extra_arguments_are_ignored() {
    let case = Case::new(INPUT, "5 2\n", "5 2\n");
    checker()
        .args(case.paths())
        .arg("extra")
        .assert()
        .success()
        .stdout("1.0\n");
}

#[test]
fn strict_input_from_flag_and_env() {
    let case = Case::new("3\n1 2 3\n", "5\n", "5\n");
    checker().args(case.paths()).assert().success().stdout("1.0\n");
    checker()
        .arg("--strict-input")
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("problem input truncated"));
    checker()
        .env("CHECKER_STRICT_INPUT", "true")
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n");
}

fn read_report(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("report written")).expect("report json")
}

#[test]
fn report_matches_stdout() {
    let case = Case::new(INPUT, "5 2\n", "5 3\n");
    let report = case.path("report.json");
    checker()
        .arg("--report")
        .arg(&report)
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n");
    let json = read_report(&report);
    assert_eq!(json["score"], 0.0);
    assert_eq!(json["status"], "mismatch");
    assert_eq!(json["message"], "Expected index=2 but got 3");
}

#[test]
fn unwritable_report_keeps_verdict() {
    let case = Case::new(INPUT, "5\n", "5\n");
    checker()
        .arg("--report")
        .arg(case.path("missing-dir/report.json"))
        .args(case.paths())
        .assert()
        .success()
        .stdout("1.0\n");
}

#[test]
fn strict_report_classifies_bad_input_token() {
    let case = Case::new("1 q 0 5\n", "5\n", "5\n");
    let report = case.path("report.json");
    checker()
        .arg("--strict-input")
        .arg("--report")
        .arg(&report)
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("found `q`"));
    let json = read_report(&report);
    assert_eq!(json["status"], "malformed-input");
}

#[test]
fn malformed_reference_index_rejects() {
    let case = Case::new(INPUT, "5 abc\n", "5\n");
    let report = case.path("report.json");
    checker()
        .arg("--report")
        .arg(&report)
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("reference output").and(predicate::str::contains("`abc`")));
    assert_eq!(read_report(&report)["status"], "malformed-token");
}

#[test]
fn numeric_prefix_submission_rejects() {
    let case = Case::new(INPUT, "5\n", "5.0\n");
    checker()
        .args(case.paths())
        .assert()
        .success()
        .stdout("0.0\n")
        .stderr(predicate::str::contains("`5.0`"));
}
