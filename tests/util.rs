//! Shared test utilities for integration tests
//!
//! Builds bank directories on disk in the layout the CLI expects.

#![allow(dead_code)]

use assert_fs::prelude::*;
use serde_json::{Value, json};

/// One question record for a `(grade, difficulty, subject-label)` file.
pub fn question(
    n: usize,
    content: &str,
    grade: u8,
    difficulty: &str,
    subject: &str,
) -> Value
{
    json!({
        "_id": format!("legacy_{n}"),
        "content": content,
        "options": ["1", "2", "3", "4"],
        "correctAnswer": "1",
        "subject": subject,
        "grade": grade,
        "difficulty": difficulty,
        "explanation": "Worked solution for this item.",
        "type": "multiple_choice"
    })
}

/// Ten distinct quadratics followed by ten other hard-math items.
pub fn concentrated_math() -> Vec<Value>
{
    let mut contents: Vec<String> = (1..=10)
        .map(|n| format!("Solve x² - {}x + {} = 0", n + 1, n))
        .collect();
    contents.extend(
        [
            "Solve the system of equations: x + y = 5 and x - y = 1.",
            "Find the derivative of f(x) = 4x² + 3x.",
            "What is cos(60°)?",
            "What is log₂(64)?",
            "Find the determinant of the matrix [[2, 1], [1, 3]].",
            "Factor: x² + 9x + 20",
            "If f(x) = 3x + 1, what is f(2)?",
            "A bag holds 2 red and 3 blue marbles. What is the probability of drawing a red marble?",
            "Solve for x: 3^x = 81",
            "What is the mean of 4, 6, 8 and 10?",
        ]
        .map(String::from),
    );

    contents
        .iter()
        .enumerate()
        .map(|(i, c)| question(i, c, 10, "hard", "Mathematics"))
        .collect()
}

/// Distinct easy-math items with no type over the default threshold.
pub fn clean_math(grade: u8) -> Vec<Value>
{
    [
        "What is 12 + 30?",
        "What is 45 - 18?",
        "What is 6 × 7?",
        "What is 56 ÷ 8?",
    ]
    .iter()
    .enumerate()
    .map(|(i, c)| question(i, c, grade, "easy", "Mathematics"))
    .collect()
}

/// Write `items` as a bare JSON array under `dir/name`.
pub fn write_bank(
    dir: &assert_fs::TempDir,
    name: &str,
    items: &[Value],
)
{
    let text = serde_json::to_string_pretty(items).expect("serialize");
    dir.child(name)
        .write_str(&text)
        .expect("write bank");
}

/// Parse a bank file back into its question array.
pub fn read_bank(
    dir: &assert_fs::TempDir,
    name: &str,
) -> Vec<Value>
{
    let text = std::fs::read_to_string(
        dir.path()
            .join(name),
    )
    .expect("read bank");
    match serde_json::from_str::<Value>(&text).expect("valid json")
    {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions")
        {
            Some(Value::Array(items)) => items,
            _ => panic!("no questions array"),
        },
        _ => panic!("unexpected bank shape"),
    }
}

/// Normalized-enough content list for uniqueness checks.
pub fn contents(items: &[Value]) -> Vec<String>
{
    items
        .iter()
        .map(|q| {
            q["content"]
                .as_str()
                .unwrap_or_default()
                .trim()
                .to_lowercase()
        })
        .collect()
}

/// Bank directory with one concentrated file, one clean file and a manifest.
pub fn make_bank_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    write_bank(&tmp, "10_hard_math.json", &concentrated_math());
    write_bank(&tmp, "3_easy_math.json", &clean_math(3));
    tmp.child("manifest.json")
        .write_str("{\"files\": [\"10_hard_math.json\", \"3_easy_math.json\"]}")
        .expect("write manifest");
    tmp
}
