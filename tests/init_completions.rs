// init writes a usable config; completions name the binary.
use assert_cmd::prelude::*;
use std::process::Command;

use assert_fs::prelude::*;
use predicates::prelude::*;

mod util;

#[test]
fn init_writes_default_config_once() {
    let tmp = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("qbank")
        .expect("bin")
        .arg("init")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    tmp.child("qbank.toml")
        .assert(predicate::str::contains("type_threshold = 3"));

    Command::cargo_bin("qbank")
        .expect("bin")
        .arg("init")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    Command::cargo_bin("qbank")
        .expect("bin")
        .args(["init", "--force"])
        .arg(tmp.path())
        .assert()
        .success();
}

#[test]
fn config_file_drives_threshold_and_directory() {
    let tmp = util::make_bank_fixture();
    tmp.child("qbank.toml")
        .write_str("questions_dir = \".\"\n[detect]\ntype_threshold = 10\n")
        .unwrap();

    // No path argument: questions_dir from ./qbank.toml
    Command::cargo_bin("qbank")
        .expect("bin")
        .current_dir(tmp.path())
        .args(["--no-color", "scan"])
        .env_remove("QBANK_DETECT__TYPE_THRESHOLD")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 files with findings"));

    // Environment beats the file
    Command::cargo_bin("qbank")
        .expect("bin")
        .current_dir(tmp.path())
        .args(["--no-color", "scan"])
        .env("QBANK_DETECT__TYPE_THRESHOLD", "3")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file with findings"));
}

#[test]
fn completions_to_stdout() {
    Command::cargo_bin("qbank")
        .expect("bin")
        .args(["completions", "bash", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qbank"))
        .stdout(predicate::str::contains("cross-file"));
}
