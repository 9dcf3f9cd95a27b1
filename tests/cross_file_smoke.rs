// Cross-file repair across several bank files.
use assert_cmd::prelude::*;
use std::collections::HashSet;
use std::process::Command;

use predicates::prelude::*;

mod util;

fn qbank() -> Command {
    let mut cmd = Command::cargo_bin("qbank").expect("bin");
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

/// The same addition item sits in grade 3 and grade 4 easy math.
fn shared_fixture() -> assert_fs::TempDir {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    util::write_bank(&tmp, "3_easy_math.json", &util::clean_math(3));

    let mut grade4 = util::clean_math(4);
    grade4[0]["content"] = "What is 12 + 30?  (Version 2)".into();
    grade4[1]["content"] = "How many centimeters are in 3 meters?".into();
    grade4[2]["content"] = "What is 9 × 8?".into();
    grade4[3]["content"] = "What is 81 ÷ 9?".into();
    util::write_bank(&tmp, "4_easy_math.json", &grade4);
    tmp
}

#[test]
fn report_only_lists_groups_without_writing() {
    let tmp = shared_fixture();
    let before = std::fs::read_to_string(tmp.path().join("4_easy_math.json")).unwrap();

    qbank()
        .arg("cross-file")
        .arg(tmp.path())
        .arg("--report-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("what is 12 + 30?"))
        .stdout(predicate::str::contains("3_easy_math.json#1"));

    let after = std::fs::read_to_string(tmp.path().join("4_easy_math.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn later_file_gets_the_replacement() {
    let tmp = shared_fixture();
    let kept = std::fs::read_to_string(tmp.path().join("3_easy_math.json")).unwrap();

    qbank()
        .arg("cross-file")
        .arg(tmp.path())
        .args(["--seed", "13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4_easy_math.json: replaced 1 question"));

    // First occurrence wins; its file is untouched
    assert_eq!(std::fs::read_to_string(tmp.path().join("3_easy_math.json")).unwrap(), kept);

    let grade3 = util::contents(&util::read_bank(&tmp, "3_easy_math.json"));
    let grade4 = util::read_bank(&tmp, "4_easy_math.json");
    assert_eq!(grade4.len(), 4);
    assert_eq!(grade4[0]["_id"], "grade4_easy_math_001");

    let seen: HashSet<String> = grade3.into_iter().collect();
    for c in util::contents(&grade4) {
        assert!(!seen.contains(&c), "still shared: {c}");
    }

    // Nothing left to repair
    qbank()
        .arg("cross-file")
        .arg(tmp.path())
        .arg("--report-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 duplicate groups spanning files"));
}
