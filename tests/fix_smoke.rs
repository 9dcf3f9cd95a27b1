// Spawns the compiled binary against on-disk bank fixtures.
use assert_cmd::prelude::*;
use std::process::Command;

use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

mod util;

fn qbank() -> Command {
    let mut cmd = Command::cargo_bin("qbank").expect("bin");
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn fix_rewrites_concentrated_file_and_keeps_size() {
    let tmp = util::make_bank_fixture();
    let before = util::read_bank(&tmp, "10_hard_math.json");
    let clean_before = std::fs::read_to_string(tmp.path().join("3_easy_math.json")).unwrap();

    qbank()
        .arg("fix")
        .arg(tmp.path())
        .args(["--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10_hard_math.json: replaced 7 of 20"));

    let after = util::read_bank(&tmp, "10_hard_math.json");
    assert_eq!(after.len(), before.len());

    // Sequential ids for every entry
    for (i, q) in after.iter().enumerate() {
        assert_eq!(q["_id"], Value::from(format!("grade10_hard_math_{:03}", i + 1)));
        assert_eq!(q["subject"], "Mathematics");
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
    }

    // Content is unique after the pass
    let mut keys = util::contents(&after);
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), after.len());

    // Clean files are never rewritten
    let clean_after = std::fs::read_to_string(tmp.path().join("3_easy_math.json")).unwrap();
    assert_eq!(clean_after, clean_before);

    // The manifest is not a bank file
    tmp.child("manifest.json")
        .assert(predicate::str::contains("\"files\""));
}

#[test]
fn second_fix_is_a_no_op() {
    let tmp = util::make_bank_fixture();

    qbank().arg("fix").arg(tmp.path()).args(["--seed", "1"]).assert().success();
    let first = std::fs::read_to_string(tmp.path().join("10_hard_math.json")).unwrap();

    qbank()
        .arg("fix")
        .arg(tmp.path())
        .args(["--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 questions replaced"));
    let second = std::fs::read_to_string(tmp.path().join("10_hard_math.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn dry_run_leaves_files_untouched() {
    let tmp = util::make_bank_fixture();
    let before = std::fs::read_to_string(tmp.path().join("10_hard_math.json")).unwrap();

    qbank()
        .arg("fix")
        .arg(tmp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("would replace 7 of 20"));

    let after = std::fs::read_to_string(tmp.path().join("10_hard_math.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn json_reports_one_entry_per_file() {
    let tmp = util::make_bank_fixture();

    let out = qbank()
        .arg("fix")
        .arg(tmp.path())
        .args(["--seed", "9", "--json", "--quiet"])
        .output()
        .expect("run");
    assert!(out.status.success());

    let reports: Value = serde_json::from_slice(&out.stdout).expect("json");
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 2);

    let hard = reports
        .iter()
        .find(|r| r["path"].as_str().unwrap().ends_with("10_hard_math.json"))
        .expect("hard math report");
    assert_eq!(hard["fixed"], 7);
    assert_eq!(hard["written"], true);
}

#[test]
fn malformed_file_is_skipped_and_fails_the_batch() {
    let tmp = util::make_bank_fixture();
    tmp.child("4_easy_math.json").write_str("[{\"content\": ").unwrap();

    qbank()
        .arg("fix")
        .arg(tmp.path())
        .args(["--seed", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4_easy_math.json"));

    // The healthy file was still repaired
    let after = util::read_bank(&tmp, "10_hard_math.json");
    assert_eq!(after[19]["_id"], "grade10_hard_math_020");
}

#[test]
fn wrapped_files_keep_their_envelope() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let doc = serde_json::json!({
        "version": 2,
        "questions": util::concentrated_math(),
    });
    tmp.child("10_hard_math.json")
        .write_str(&serde_json::to_string_pretty(&doc).unwrap())
        .unwrap();

    qbank().arg("fix").arg(tmp.path()).args(["--seed", "11"]).assert().success();

    let text = std::fs::read_to_string(tmp.path().join("10_hard_math.json")).unwrap();
    let back: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(back["version"], 2);
    assert_eq!(back["questions"].as_array().unwrap().len(), 20);
}
