//! Scripted runs of the companion binary against an isolated data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget_split_cli").expect("binary");
    cmd.env("BUDGET_SPLIT_HOME", home.path());
    cmd
}

fn stdout_of(home: &TempDir, args: &[&str]) -> String {
    let output = cli(home).args(args).output().expect("run");
    assert!(output.status.success(), "command {args:?} failed");
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn usage_is_printed_without_a_command() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: budget_split_cli"));
}

#[test]
fn add_and_show_report_totals() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .args(["add", "income", "Salary", "5000"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "needs", "Rent", "1500"])
        .assert()
        .success();

    cli(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("5000.00"))
        .stdout(predicate::str::contains("3500.00"));
}

#[test]
fn share_then_import_restores_the_budget() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .args(["add", "income", "Salary", "4000"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "wants", "Concerts", "150"])
        .assert()
        .success();

    let code = stdout_of(&home, &["share"]).trim().to_string();
    assert!(!code.is_empty());

    cli(&home).arg("clear").assert().success();
    cli(&home)
        .args(["import", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Concerts"));
}

#[test]
fn importing_garbage_fails_cleanly() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .args(["import", "not-valid-base64!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid budget code"));
}

#[test]
fn saved_budget_lifecycle_via_the_cli() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .args(["add", "income", "Salary", "3000"])
        .assert()
        .success();

    let saved_line = stdout_of(&home, &["save", "March"]);
    let id = saved_line
        .split('(')
        .nth(1)
        .and_then(|rest| rest.split(')').next())
        .expect("saved id")
        .to_string();

    cli(&home)
        .arg("saved")
        .assert()
        .success()
        .stdout(predicate::str::contains("March"));

    cli(&home)
        .args(["rename", &id, "March Final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("March Final"));

    cli(&home)
        .args(["delete", &id])
        .assert()
        .success();
    cli(&home)
        .arg("saved")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved budgets."));
}

#[test]
fn share_url_mode_prepends_the_base() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .args(["add", "savings", "Emergency", "200"])
        .assert()
        .success();
    cli(&home)
        .args(["share", "https://budget.example/app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://budget.example/app?budget="));
}
