//! End-to-end tests for the `plan` command.
//!
//! These tests verify the CLI behavior of the `plan` command by invoking
//! the binary directly and checking its output and exit code.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_help() {
    let mut cmd = cargo_bin_cmd!("syncdrift");
    cmd.arg("plan")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Show the diff that `apply` would make"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_no_changes() {
    let fixture = TestFixture::new().with_minimal_config();
    fixture
        .command()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_reports_create() {
    let fixture = TestFixture::new().with_config(configs::STATIC_FILE);
    fixture
        .command()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files to create"))
        .stdout(predicate::str::contains("hello.txt"));

    // plan never writes to disk
    assert!(!fixture.path().join("hello.txt").exists());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_summary_flag() {
    let fixture = TestFixture::new().with_config(configs::STATIC_FILE);
    fixture
        .command()
        .arg("plan")
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("file(s) would be created"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_exit_code_on_change() {
    let fixture = TestFixture::new().with_config(configs::STATIC_FILE);
    fixture
        .command()
        .arg("plan")
        .arg("--exit-code-on-change")
        .assert()
        .code(1);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_without_exit_code_flag_succeeds_despite_changes() {
    let fixture = TestFixture::new().with_config(configs::STATIC_FILE);
    fixture.command().arg("plan").assert().code(0);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_plan_missing_config_fails() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No config file found"));
}
