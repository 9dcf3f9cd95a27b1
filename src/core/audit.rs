//! Quality audit of a bank file, and the label fixer.
//!
//! Besides structural checks, the audit flags content pitched at the wrong
//! grade: bare arithmetic in high-school math or in hard upper-grade files,
//! and calculus-level vocabulary in elementary math.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::normalize::normalize;
use crate::core::question::{BankFileId, Difficulty, Question, Subject};

/// Explanations shorter than this count as missing.
pub const MIN_EXPLANATION_LEN: usize = 10;

/// Boilerplate left behind by an earlier bulk generator.
const GENERIC_EXPLANATION: &str = "This is a hard level math question specifically designed";

/// `What is 12 + 7?` and `3 - 1 =` style items.
static ELEMENTARY_ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what is \d+ [+\-×÷] \d+\?|\d+ [+\-] \d+ =")
        .expect("elementary arithmetic pattern compiles")
});

static BASIC_ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what is \d+ [+\-×÷] \d+\?|\d+ [+\-×÷] \d+ =")
        .expect("basic arithmetic pattern compiles")
});

static ADVANCED_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)derivative|integral|quadratic equation|trigonometric|logarithm|calculus")
        .expect("advanced term pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "kebab-case")]
pub enum Issue
{
    SubjectLabel
    {
        expected: String, actual: String
    },
    Grade
    {
        expected: u8, actual: u8
    },
    Difficulty
    {
        expected: Difficulty,
        actual: Difficulty,
    },
    OptionCount
    {
        count: usize
    },
    RepeatedOption,
    AnswerNotInOptions,
    ContentTooShort
    {
        len: usize, min: usize
    },
    DuplicateContent
    {
        first: usize
    },
    ElementaryMathInHighSchool,
    AdvancedMathInElementary
    {
        term: String
    },
    BasicArithmeticAsHard,
    MissingExplanation
    {
        len: usize
    },
    GenericExplanation,
}

impl Issue
{
    /// Fixable by `relabel`.
    pub fn is_label(&self) -> bool
    {
        matches!(self, Issue::SubjectLabel { .. } | Issue::Grade { .. } | Issue::Difficulty { .. })
    }

    /// Content pitched at the wrong grade or difficulty.
    pub fn is_grade_fit(&self) -> bool
    {
        matches!(
            self,
            Issue::ElementaryMathInHighSchool
                | Issue::AdvancedMathInElementary { .. }
                | Issue::BasicArithmeticAsHard
        )
    }
}

impl fmt::Display for Issue
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        match self
        {
            Issue::SubjectLabel { expected, actual } =>
            {
                write!(f, "subject is `{actual}`, expected `{expected}`")
            }
            Issue::Grade { expected, actual } => write!(f, "grade is {actual}, expected {expected}"),
            Issue::Difficulty { expected, actual } =>
            {
                write!(f, "difficulty is {actual}, expected {expected}")
            }
            Issue::OptionCount { count } => write!(f, "{count} options, expected 4"),
            Issue::RepeatedOption => f.write_str("options repeat"),
            Issue::AnswerNotInOptions => f.write_str("correct answer is not one of the options"),
            Issue::ContentTooShort { len, min } => write!(f, "content is {len} chars, minimum {min}"),
            Issue::DuplicateContent { first } => write!(f, "same content as entry {}", first + 1),
            Issue::ElementaryMathInHighSchool => f.write_str("elementary arithmetic in a high-school file"),
            Issue::AdvancedMathInElementary { term } =>
            {
                write!(f, "`{term}` is too advanced for an elementary file")
            }
            Issue::BasicArithmeticAsHard => f.write_str("basic arithmetic filed as hard"),
            Issue::MissingExplanation { len } =>
            {
                write!(f, "explanation is {len} chars, minimum {MIN_EXPLANATION_LEN}")
            }
            Issue::GenericExplanation => f.write_str("explanation is generic boilerplate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding
{
    pub index: usize,
    pub id: String,
    #[serde(flatten)]
    pub issue: Issue,
}

/// Every issue in `questions`, in file order.
pub fn audit_questions(
    file: &BankFileId,
    questions: &[Question],
    min_content_length: usize,
) -> Vec<Finding>
{
    let label = file
        .subject
        .label();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();

    for (i, q) in questions
        .iter()
        .enumerate()
    {
        let mut push = |issue| {
            out.push(Finding { index: i, id: q.id.clone(), issue });
        };

        if q.subject != label
        {
            push(Issue::SubjectLabel { expected: label.clone(), actual: q.subject.clone() });
        }
        if q.grade != file.grade
        {
            push(Issue::Grade { expected: file.grade, actual: q.grade });
        }
        if q.difficulty != file.difficulty
        {
            push(Issue::Difficulty { expected: file.difficulty, actual: q.difficulty });
        }

        if q.options.len() != 4
        {
            push(Issue::OptionCount { count: q.options.len() });
        }
        let mut distinct = q.options.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != q.options.len()
        {
            push(Issue::RepeatedOption);
        }

        let answered = q
            .answer_text()
            .is_some_and(|a| q.options.iter().any(|o| o == a));
        if !answered
        {
            push(Issue::AnswerNotInOptions);
        }

        let len = q
            .content
            .trim()
            .chars()
            .count();
        if len < min_content_length
        {
            push(Issue::ContentTooShort { len, min: min_content_length });
        }

        for issue in grade_flags(file, &q.content)
        {
            push(issue);
        }

        let explained = q
            .explanation
            .trim()
            .chars()
            .count();
        if explained < MIN_EXPLANATION_LEN
        {
            push(Issue::MissingExplanation { len: explained });
        }
        else if q
            .explanation
            .contains(GENERIC_EXPLANATION)
        {
            push(Issue::GenericExplanation);
        }

        let key = normalize(&q.content);
        match seen.get(key.as_str())
        {
            Some(&first) => push(Issue::DuplicateContent { first }),
            None =>
            {
                seen.insert(key.as_str().to_string(), i);
            }
        }
    }

    out
}

/// Grade-appropriateness red flags for `content` in `file`.
///
/// Math at grade 9 and up must not be bare arithmetic, math at grade 5 and
/// below must not use calculus-level terms, and no hard file from grade 7 up
/// may hold basic arithmetic.
pub fn grade_flags(
    file: &BankFileId,
    content: &str,
) -> Vec<Issue>
{
    let mut out = Vec::new();

    if file.subject == Subject::Math
    {
        if file.grade >= 9 && ELEMENTARY_ARITHMETIC.is_match(content)
        {
            out.push(Issue::ElementaryMathInHighSchool);
        }
        if file.grade <= 5
        {
            if let Some(m) = ADVANCED_TERMS.find(content)
            {
                out.push(Issue::AdvancedMathInElementary { term: m.as_str().to_lowercase() });
            }
        }
    }

    if file.difficulty == Difficulty::Hard && file.grade >= 7 && BASIC_ARITHMETIC.is_match(content)
    {
        out.push(Issue::BasicArithmeticAsHard);
    }

    out
}

/// Rewrite subject/grade/difficulty to match the file. Returns entries changed.
pub fn relabel(
    file: &BankFileId,
    questions: &mut [Question],
) -> usize
{
    let label = file
        .subject
        .label();
    let mut changed = 0;

    for q in questions
    {
        if q.subject != label || q.grade != file.grade || q.difficulty != file.difficulty
        {
            q.subject = label.clone();
            q.grade = file.grade;
            q.difficulty = file.difficulty;
            changed += 1;
        }
    }

    changed
}
