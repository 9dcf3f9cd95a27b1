//! Duplicate detection over one pool of questions.
//!
//! Two groupings come out of a single pass: exact duplicates (same normalized
//! key) and over-concentrated types (more than `threshold` distinct questions
//! sharing one reasoning pattern). The first occurrence of every key, and the
//! first `threshold` members of every type, are kept; everything else is
//! flagged for replacement.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::classify::{Classifier, QuestionType};
use crate::core::normalize::{NormalizedKey, normalize};
use crate::core::question::Question;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactGroup
{
    pub key: NormalizedKey,
    /// Positions in file order; the first is the kept representative.
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeGroup
{
    pub kind: QuestionType,
    /// Distinct-content members in file order.
    pub indices: Vec<usize>,
    pub kept: usize,
}

impl TypeGroup
{
    pub fn excess(&self) -> usize
    {
        self.indices
            .len()
            .saturating_sub(self.kept)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Findings
{
    pub exact: Vec<ExactGroup>,
    pub concentrated: Vec<TypeGroup>,
    /// Positions to replace, ascending.
    pub flagged: BTreeSet<usize>,
}

impl Findings
{
    pub fn is_clean(&self) -> bool
    {
        self.flagged
            .is_empty()
    }

    pub fn exact_extra(&self) -> usize
    {
        self.exact
            .iter()
            .map(|g| g.indices.len() - 1)
            .sum()
    }
}

pub struct Detector<'a>
{
    classifier: &'a Classifier,
    threshold: usize,
}

impl<'a> Detector<'a>
{
    pub fn new(
        classifier: &'a Classifier,
        threshold: usize,
    ) -> Self
    {
        Self { classifier, threshold: threshold.max(1) }
    }

    pub fn threshold(&self) -> usize
    {
        self.threshold
    }

    pub fn analyze(
        &self,
        questions: &[Question],
    ) -> Findings
    {
        let mut by_key: IndexMap<NormalizedKey, Vec<usize>> = IndexMap::new();
        let mut by_type: IndexMap<QuestionType, Vec<usize>> = IndexMap::new();

        for (i, q) in questions
            .iter()
            .enumerate()
        {
            let key = normalize(&q.content);
            if let Some(seen) = by_key.get_mut(&key)
            {
                seen.push(i);
                continue;
            }

            // Types are counted over distinct content only
            let kind = self
                .classifier
                .classify(&key);
            by_type
                .entry(kind)
                .or_default()
                .push(i);
            by_key.insert(key, vec![i]);
        }

        let mut findings = Findings::default();

        for (key, indices) in by_key
        {
            if indices.len() > 1
            {
                findings
                    .flagged
                    .extend(indices[1..].iter().copied());
                findings
                    .exact
                    .push(ExactGroup { key, indices });
            }
        }

        for (kind, indices) in by_type
        {
            if kind.is_concentratable() && indices.len() > self.threshold
            {
                findings
                    .flagged
                    .extend(indices[self.threshold..].iter().copied());
                findings
                    .concentrated
                    .push(TypeGroup { kind, indices, kept: self.threshold });
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::question::Difficulty;

    fn q(content: &str) -> Question
    {
        Question {
            id: String::new(),
            content: content.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: Some("a".into()),
            correct_index: None,
            subject: "Mathematics".into(),
            grade: 5,
            difficulty: Difficulty::Hard,
            explanation: String::new(),
            extra: Default::default(),
        }
    }

    #[test]
    fn clean_pool_has_no_findings()
    {
        let classifier = Classifier::builtin();
        let pool = vec![q("What is 3 + 4?"), q("What is 7 × 8?"), q("What is sin(30°)?")];
        let findings = Detector::new(&classifier, 3).analyze(&pool);
        assert!(findings.is_clean());
        assert!(findings.exact.is_empty() && findings.concentrated.is_empty());
    }

    #[test]
    fn exact_duplicates_keep_first()
    {
        let classifier = Classifier::builtin();
        let pool = vec![
            q("Solve x²+3x+2=0 (Version 539)"),
            q("What is 7 × 8?"),
            q("Solve x²+3x+2=0 (Version 264)"),
            q("solve   X²+3x+2=0"),
        ];
        let findings = Detector::new(&classifier, 3).analyze(&pool);
        assert_eq!(findings.exact.len(), 1);
        assert_eq!(findings.exact[0].indices, vec![0, 2, 3]);
        assert_eq!(findings.exact_extra(), 2);
        assert_eq!(findings.flagged, BTreeSet::from([2, 3]));
    }

    #[test]
    fn concentration_keeps_first_threshold()
    {
        let classifier = Classifier::builtin();
        let pool: Vec<Question> = (1..=6)
            .map(|n| q(&format!("Solve x² - {}x + {} = 0", n + 1, n)))
            .chain([q("What is 7 × 8?")])
            .collect();

        let findings = Detector::new(&classifier, 3).analyze(&pool);
        assert_eq!(findings.concentrated.len(), 1);
        let group = &findings.concentrated[0];
        assert_eq!(group.kind, QuestionType::Quadratic);
        assert_eq!(group.indices.len(), 6);
        assert_eq!(group.excess(), 3);
        assert_eq!(findings.flagged, BTreeSet::from([3, 4, 5]));
    }

    #[test]
    fn exact_copies_do_not_inflate_type_counts()
    {
        let classifier = Classifier::builtin();
        let pool = vec![
            q("Solve x² - 3x + 2 = 0"),
            q("Solve x² - 3x + 2 = 0 (Version 2)"),
            q("Solve x² - 5x + 6 = 0"),
            q("Solve x² - 5x + 6 = 0 (Version 9)"),
        ];
        let findings = Detector::new(&classifier, 2).analyze(&pool);
        assert!(findings.concentrated.is_empty());
        assert_eq!(findings.flagged, BTreeSet::from([1, 3]));
    }

    #[test]
    fn other_is_never_concentrated()
    {
        let classifier = Classifier::builtin();
        let pool: Vec<Question> = (0..10)
            .map(|n| q(&format!("Name landmark number {n}.")))
            .collect();
        let findings = Detector::new(&classifier, 3).analyze(&pool);
        assert!(findings.is_clean());
    }
}
