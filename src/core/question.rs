//! Question bank data model.
//!
//! A bank file is named `{grade}_{difficulty}_{subject}.json` and holds either a
//! bare JSON array of questions or an object with a `questions` array. Both
//! shapes round-trip unchanged, as does the spelling of the id key (`_id` or
//! `id`). Unknown keys on a question are kept in their original order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::BankError;

/// Difficulty tier encoded in the file name and on every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty
{
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Hard")]
    Hard,
}

impl Difficulty
{
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str
    {
        match self
        {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_ascii_lowercase().as_str()
        {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty `{other}`")),
        }
    }
}

/// Subject slug as it appears in file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject
{
    Math,
    English,
    Reading,
    ThinkingSkills,
    Other(String),
}

impl Subject
{
    pub fn from_slug(slug: &str) -> Self
    {
        match slug
        {
            "math" => Subject::Math,
            "english" => Subject::English,
            "reading" => Subject::Reading,
            "thinking-skills" => Subject::ThinkingSkills,
            other => Subject::Other(other.to_string()),
        }
    }

    pub fn slug(&self) -> &str
    {
        match self
        {
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Reading => "reading",
            Subject::ThinkingSkills => "thinking-skills",
            Subject::Other(s) => s,
        }
    }

    /// Label written into the `subject` field of a question.
    pub fn label(&self) -> String
    {
        match self
        {
            Subject::Math => "Mathematics".to_string(),
            Subject::English => "English".to_string(),
            Subject::Reading => "Reading".to_string(),
            Subject::ThinkingSkills => "Thinking Skills".to_string(),
            Subject::Other(s) => title_case(&s.replace(['-', '_'], " ")),
        }
    }
}

impl fmt::Display for Subject
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.slug())
    }
}

fn title_case(s: &str) -> String
{
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next()
            {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identity of one bank file: the `(grade, difficulty, subject)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BankFileId
{
    pub grade: u8,
    pub difficulty: Difficulty,
    pub subject: Subject,
}

impl BankFileId
{
    pub fn new(
        grade: u8,
        difficulty: Difficulty,
        subject: Subject,
    ) -> Self
    {
        Self { grade, difficulty, subject }
    }

    /// Parse `5_hard_math.json` (the extension is optional).
    pub fn from_file_name(name: &str) -> Result<Self, BankError>
    {
        let bad = || BankError::FileName(name.to_string());
        let stem = name
            .strip_suffix(".json")
            .unwrap_or(name);

        let mut parts = stem.splitn(3, '_');
        let grade: u8 = parts
            .next()
            .and_then(|g| g.parse().ok())
            .ok_or_else(bad)?;
        let difficulty: Difficulty = parts
            .next()
            .and_then(|d| d.parse().ok())
            .ok_or_else(bad)?;
        let subject = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(bad)?;

        if !(1..=12).contains(&grade)
        {
            return Err(bad());
        }

        Ok(Self::new(grade, difficulty, Subject::from_slug(subject)))
    }

    pub fn file_name(&self) -> String
    {
        format!("{}_{}_{}.json", self.grade, self.difficulty, self.subject)
    }

    /// Sequential id for the 0-based `index`: `grade5_hard_math_007`.
    pub fn sequential_id(
        &self,
        index: usize,
    ) -> String
    {
        format!("grade{}_{}_{}_{:03}", self.grade, self.difficulty, self.subject, index + 1)
    }
}

impl fmt::Display for BankFileId
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "grade {} {} {}", self.grade, self.difficulty, self.subject)
    }
}

/// One multiple-choice question.
///
/// The answer is stored either as option text (`correctAnswer`) or as a
/// legacy option index (`correct_answer`); whichever was read is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question
{
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(rename = "correctAnswer", default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,

    #[serde(rename = "correct_answer", default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub grade: u8,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub explanation: String,

    /// Keys this tool does not interpret (`type`, `topic`, `passage`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question
{
    /// Text of the correct option, resolving a legacy index if needed.
    pub fn answer_text(&self) -> Option<&str>
    {
        match (&self.correct_answer, self.correct_index)
        {
            (Some(text), _) => Some(text.as_str()),
            (None, Some(i)) => self
                .options
                .get(i)
                .map(String::as_str),
            (None, None) => None,
        }
    }

    pub fn with_id(
        mut self,
        id: String,
    ) -> Self
    {
        self.id = id;
        self
    }
}

/// A parsed bank file, remembering which envelope it came in and whether its
/// records named their id `id` rather than `_id`. Both are written back the
/// way they were read.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDoc
{
    pub questions: Vec<Question>,
    envelope: Option<Map<String, Value>>,
    plain_id: bool,
}

impl QuestionDoc
{
    pub fn bare(questions: Vec<Question>) -> Self
    {
        Self { questions, envelope: None, plain_id: false }
    }

    /// Records spell the id key `id` (no record uses `_id`).
    fn uses_plain_id(items: &[Value]) -> bool
    {
        let objects = || {
            items
                .iter()
                .filter_map(Value::as_object)
        };
        objects().any(|o| o.contains_key("id")) && !objects().any(|o| o.contains_key("_id"))
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error>
    {
        use serde::de::Error as _;

        match serde_json::from_str::<Value>(text)?
        {
            Value::Array(items) =>
            {
                let plain_id = Self::uses_plain_id(&items);
                let questions = serde_json::from_value(Value::Array(items))?;
                Ok(Self { plain_id, ..Self::bare(questions) })
            }
            Value::Object(map) =>
            {
                let Some(list) = map.get("questions")
                else
                {
                    return Err(serde_json::Error::custom(
                        "expected an array or an object with a `questions` array",
                    ));
                };
                let plain_id = list
                    .as_array()
                    .is_some_and(|items| Self::uses_plain_id(items));
                let questions = serde_json::from_value(list.clone())?;
                Ok(Self { questions, envelope: Some(map), plain_id })
            }
            _ => Err(serde_json::Error::custom(
                "expected an array or an object with a `questions` array",
            )),
        }
    }

    pub fn is_wrapped(&self) -> bool
    {
        self.envelope
            .is_some()
    }

    /// The question array as JSON, with `_id` renamed back to `id` in place
    /// when that is how the file spelled it.
    fn questions_value(&self) -> Result<Value, serde_json::Error>
    {
        let mut list = serde_json::to_value(&self.questions)?;
        if self.plain_id
        {
            if let Value::Array(items) = &mut list
            {
                for item in items
                {
                    if let Value::Object(obj) = item
                    {
                        *obj = std::mem::take(obj)
                            .into_iter()
                            .map(|(k, v)| if k == "_id" { ("id".to_string(), v) } else { (k, v) })
                            .collect();
                    }
                }
            }
        }
        Ok(list)
    }

    /// Pretty JSON (two-space indent) with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error>
    {
        let list = self.questions_value()?;
        let mut out = match &self.envelope
        {
            None => serde_json::to_string_pretty(&list)?,
            Some(map) =>
            {
                // Insert replaces in place, so the envelope key order survives
                let mut map = map.clone();
                map.insert("questions".to_string(), list);
                serde_json::to_string_pretty(&Value::Object(map))?
            }
        };
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn parses_bank_file_names()
    {
        let id = BankFileId::from_file_name("9_hard_thinking-skills.json").unwrap();
        assert_eq!(id.grade, 9);
        assert_eq!(id.difficulty, Difficulty::Hard);
        assert_eq!(id.subject, Subject::ThinkingSkills);
        assert_eq!(id.file_name(), "9_hard_thinking-skills.json");
        assert_eq!(id.sequential_id(6), "grade9_hard_thinking-skills_007");

        assert!(BankFileId::from_file_name("manifest.json").is_err());
        assert!(BankFileId::from_file_name("13_easy_math.json").is_err());
        assert!(BankFileId::from_file_name("4_tricky_math.json").is_err());
        assert!(BankFileId::from_file_name("4_easy_.json").is_err());
    }

    #[test]
    fn subject_labels()
    {
        assert_eq!(Subject::Math.label(), "Mathematics");
        assert_eq!(Subject::ThinkingSkills.label(), "Thinking Skills");
        assert_eq!(Subject::from_slug("social-studies").label(), "Social Studies");
    }

    #[test]
    fn legacy_index_answers_round_trip()
    {
        let text = r#"[
  {
    "_id": "a",
    "content": "What is 2 + 2?",
    "type": "multiple_choice",
    "options": ["3", "4", "5", "6"],
    "correct_answer": 1,
    "subject": "Mathematics",
    "grade": 1,
    "difficulty": "easy",
    "explanation": "2 + 2 = 4"
  }
]"#;
        let doc = QuestionDoc::parse(text).unwrap();
        let q = &doc.questions[0];
        assert_eq!(q.answer_text(), Some("4"));
        assert_eq!(q.extra.get("type"), Some(&Value::from("multiple_choice")));

        let out = doc
            .to_json_pretty()
            .unwrap();
        assert!(out.contains("\"correct_answer\": 1"));
        assert!(!out.contains("correctAnswer"));
        assert!(out.ends_with("]\n"));
    }

    #[test]
    fn wrapped_envelope_is_kept()
    {
        let text = r#"{"version": 3, "questions": [{"id": "x", "content": "Which word is a noun?",
            "options": ["cat", "run", "blue", "fast"], "correctAnswer": "cat",
            "subject": "English", "grade": 2, "difficulty": "Easy"}], "note": "kept"}"#;
        let doc = QuestionDoc::parse(text).unwrap();
        assert!(doc.is_wrapped());
        assert_eq!(doc.questions[0].id, "x");
        assert_eq!(doc.questions[0].difficulty, Difficulty::Easy);

        let out = doc
            .to_json_pretty()
            .unwrap();
        let version = out
            .find("\"version\"")
            .unwrap();
        let questions = out
            .find("\"questions\"")
            .unwrap();
        let note = out
            .find("\"note\"")
            .unwrap();
        assert!(version < questions && questions < note);
    }

    #[test]
    fn id_key_spelling_is_kept()
    {
        let plain = r#"[{"id": "a1", "content": "Which word is a noun?", "options": ["cat", "run", "blue", "fast"],
            "correctAnswer": "cat", "subject": "English", "grade": 2, "difficulty": "easy"}]"#;
        let mut doc = QuestionDoc::parse(plain).unwrap();
        doc.questions[0] = doc.questions[0]
            .clone()
            .with_id("grade2_easy_english_001".into());
        let out = doc
            .to_json_pretty()
            .unwrap();
        assert!(out.contains("\"id\": \"grade2_easy_english_001\""), "{out}");
        assert!(!out.contains("\"_id\""));
        // Still the first key of the record
        assert!(out.find("\"id\"").unwrap() < out.find("\"content\"").unwrap());

        let underscored = plain.replace("\"id\"", "\"_id\"");
        let out = QuestionDoc::parse(&underscored)
            .unwrap()
            .to_json_pretty()
            .unwrap();
        assert!(out.contains("\"_id\": \"a1\""));

        // Wrapped files are remembered the same way
        let wrapped = format!("{{\"questions\": {plain}}}");
        let out = QuestionDoc::parse(&wrapped)
            .unwrap()
            .to_json_pretty()
            .unwrap();
        assert!(out.contains("\"id\": \"a1\"") && !out.contains("\"_id\""));
    }

    #[test]
    fn rejects_non_question_documents()
    {
        assert!(QuestionDoc::parse("{\"files\": []}").is_err());
        assert!(QuestionDoc::parse("42").is_err());
        assert!(QuestionDoc::parse("[{").is_err());
    }
}
