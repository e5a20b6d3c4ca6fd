//! CLI integration tests using the REAL scriptweld binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn scriptweld_cmd() -> Command {
    Command::cargo_bin("scriptweld").unwrap()
}

#[test]
fn test_help_output() {
    scriptweld_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("userscript"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_build_help_lists_flags() {
    scriptweld_cmd()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--monolith"))
        .stdout(predicate::str::contains("--modules"))
        .stdout(predicate::str::contains("--allow-partial"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version_output() {
    scriptweld_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scriptweld"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_version_flag() {
    scriptweld_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scriptweld"));
}

#[test]
fn test_completions_bash() {
    scriptweld_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scriptweld"));
}

#[test]
fn test_completions_unknown_shell() {
    scriptweld_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_unknown_command() {
    scriptweld_cmd()
        .arg("unknown")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_project_flag_points_at_project() {
    let project = common::TestProject::with_config();
    project.write_monolith("// legacy prose\n");

    scriptweld_cmd()
        .args(["-p", project.path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0/0 units extracted"));
}

#[test]
fn test_project_env_points_at_project() {
    let project = common::TestProject::with_config();
    project.write_monolith("// legacy prose\n");

    scriptweld_cmd()
        .env("SCRIPTWELD_PROJECT", project.path.to_str().unwrap())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monolith:"));
}
