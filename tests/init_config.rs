//! Integration tests for `cmate init`.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn init_writes_a_default_config() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    Command::cargo_bin("cmate")
        .expect("bin")
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    tmp.child("coursemates.toml")
        .assert(predicate::str::contains("dataset = \"clustered_data_v1.csv\""));
    tmp.child("coursemates.toml")
        .assert(predicate::str::contains("strategy = \"rules\""));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("coursemates.toml").write_str("# mine\n").unwrap();

    Command::cargo_bin("cmate")
        .expect("bin")
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Untouched without --force.
    tmp.child("coursemates.toml").assert("# mine\n");

    Command::cargo_bin("cmate")
        .expect("bin")
        .current_dir(tmp.path())
        .args(["init", "--force"])
        .assert()
        .success();

    tmp.child("coursemates.toml")
        .assert(predicate::str::contains("descriptors"));
}
