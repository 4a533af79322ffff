use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn tidy() -> Command {
    let mut cmd = Command::cargo_bin("cargo-tidy").expect("cargo-tidy binary");
    cmd.env_remove("CARGO").env_remove("RUST_LOG").arg("tidy");
    cmd
}

#[test]
fn test_dry_run_prints_commands_in_order() {
    let dir = tempfile::tempdir().unwrap();
    tidy()
        .args(["fmt", "--dry-run", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "cargo clippy --fix --allow-dirty --all-targets --all-features -- -D warnings -W clippy::nursery\n\
             cargo fix --allow-dirty\n\
             cargo fmt\n",
        ));
}

#[test]
fn test_dry_run_reads_tidy_toml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tidy.toml"), "[fmt]\npedantic = true\n").unwrap();
    tidy()
        .args(["fmt", "--dry-run", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-W clippy::nursery -W clippy::pedantic"));
}

#[test]
fn test_no_pedantic_flag_beats_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tidy.toml"), "[fmt]\npedantic = true\n").unwrap();
    tidy()
        .args(["fmt", "--dry-run", "--no-pedantic", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("clippy::pedantic").not());
}

#[test]
fn test_invalid_config_fails_before_running() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tidy.toml"), "[fmt]\nnope = 1\n").unwrap();
    tidy()
        .args(["fmt", "--cargo", "false", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Running").not())
        .stderr(predicate::str::contains("tidy.toml"));
}

#[test]
fn test_dry_run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = tidy()
        .args(["fmt", "--dry-run", "--json", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["success"], true);
    assert_eq!(report["steps"][0]["step"], "lint-fix");
    assert_eq!(report["steps"][2]["command"], "cargo fmt");
}

#[cfg(unix)]
#[test]
fn test_succeeding_tools_run_all_steps() {
    let dir = tempfile::tempdir().unwrap();
    tidy()
        .args(["fmt", "--cargo", "true", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Running clippy --fix..."))
        .stdout(predicate::str::contains("Running fix..."))
        .stdout(predicate::str::contains("Running fmt..."))
        .stdout(predicate::str::contains("Done."));
}

#[cfg(unix)]
#[test]
fn test_first_failure_stops_with_its_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    tidy()
        .args(["fmt", "--cargo", "false", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Running clippy --fix..."))
        .stdout(predicate::str::contains("Running fix...").not())
        .stdout(predicate::str::contains("Done.").not())
        .stderr(predicate::str::contains("cargo clippy --fix failed"));
}

#[test]
fn test_missing_cargo_program_fails() {
    let dir = tempfile::tempdir().unwrap();
    tidy()
        .args(["fmt", "--cargo", "definitely-not-a-real-cargo-binary", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to run"));
}
