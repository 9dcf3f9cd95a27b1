//! The fix pass: detect, replace flagged entries, re-index, verify, write.
//!
//! `fix_questions` is pure and works on an in-memory pool; `fix_file` wraps it
//! with loading and an atomic rewrite. Output never leaves the tool in a
//! state where the pool shrank or a content key repeats: the assembled pool
//! is checked before anything touches disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rand::RngCore;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::core::classify::Classifier;
use crate::core::detect::Detector;
use crate::core::error::{BankError, VerifyFailure};
use crate::core::generate::{Generator, GeneratorConfig, UsedSet};
use crate::core::normalize::{NormalizedKey, normalize};
use crate::core::question::{BankFileId, Question};
use crate::core::template::TemplateRegistry;
use crate::infra::io::BankFile;

/// Knobs for one run; defaults come from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings
{
    pub type_threshold: usize,
    pub max_retries: usize,
}

impl Default for EngineSettings
{
    fn default() -> Self
    {
        let g = GeneratorConfig::default();
        Self { type_threshold: g.type_threshold, max_retries: g.max_retries }
    }
}

/// Result of rebuilding one pool in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome
{
    pub questions: Vec<Question>,
    /// Entries replaced.
    pub fixed: usize,
    /// Of those, placeholders.
    pub fallbacks: usize,
    /// Entries a fresh detection pass would still flag.
    pub still_duplicate: usize,
}

/// Per-file summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixReport
{
    pub path: PathBuf,
    pub total: usize,
    pub fixed: usize,
    pub fallbacks: usize,
    pub still_duplicate: usize,
    pub written: bool,
}

impl FixReport
{
    fn clean(
        path: &Path,
        total: usize,
    ) -> Self
    {
        Self {
            path: path.to_path_buf(),
            total,
            fixed: 0,
            fallbacks: 0,
            still_duplicate: 0,
            written: false,
        }
    }
}

/// Classifier + template library + settings, built once per run.
pub struct Engine
{
    classifier: Classifier,
    registry: TemplateRegistry,
    settings: EngineSettings,
}

impl Engine
{
    pub fn new(
        classifier: Classifier,
        registry: TemplateRegistry,
        settings: EngineSettings,
    ) -> Self
    {
        Self { classifier, registry, settings }
    }

    pub fn builtin(settings: EngineSettings) -> Self
    {
        Self::new(Classifier::builtin(), TemplateRegistry::builtin(), settings)
    }

    pub fn settings(&self) -> EngineSettings
    {
        self.settings
    }

    pub fn classifier(&self) -> &Classifier
    {
        &self.classifier
    }

    pub fn detector(&self) -> Detector<'_>
    {
        Detector::new(&self.classifier, self.settings.type_threshold)
    }

    pub fn generator(&self) -> Generator<'_>
    {
        Generator::new(
            &self.registry,
            &self.classifier,
            GeneratorConfig {
                max_retries: self.settings.max_retries,
                type_threshold: self.settings.type_threshold,
            },
        )
    }

    /// Keys and types of every entry that survives (is not in `flagged`).
    pub fn seed_used(
        &self,
        questions: &[Question],
        flagged: &BTreeSet<usize>,
    ) -> UsedSet
    {
        let mut used = UsedSet::new();
        for (i, q) in questions
            .iter()
            .enumerate()
        {
            if flagged.contains(&i)
            {
                continue;
            }
            let key = normalize(&q.content);
            let kind = self
                .classifier
                .classify(&key);
            used.insert(key, kind);
        }
        used
    }

    /// Replace every flagged position, re-index ids, verify.
    ///
    /// `used` must already hold the survivors (see [`Engine::seed_used`]) and
    /// any keys reserved elsewhere.
    pub fn rebuild(
        &self,
        questions: &[Question],
        file: &BankFileId,
        flagged: &BTreeSet<usize>,
        mut used: UsedSet,
        rng: &mut dyn RngCore,
    ) -> Result<FixOutcome, VerifyFailure>
    {
        let generator = self.generator();
        let mut fallbacks = 0;

        let rebuilt: Vec<Question> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let q = if flagged.contains(&i)
                {
                    let generated = generator.generate(file, &mut used, i, rng);
                    debug!(slot = i, fallback = generated.is_fallback(), "replaced");
                    if generated.is_fallback()
                    {
                        fallbacks += 1;
                    }
                    generated.into_question()
                }
                else
                {
                    q.clone()
                };
                q.with_id(file.sequential_id(i))
            })
            .collect();

        verify(questions.len(), &rebuilt)?;

        let still_duplicate = self
            .detector()
            .analyze(&rebuilt)
            .flagged
            .len();

        Ok(FixOutcome { questions: rebuilt, fixed: flagged.len(), fallbacks, still_duplicate })
    }

    /// Detect and repair one pool. `None` when there is nothing to fix.
    pub fn fix_questions(
        &self,
        questions: &[Question],
        file: &BankFileId,
        rng: &mut dyn RngCore,
    ) -> Result<Option<FixOutcome>, VerifyFailure>
    {
        let findings = self
            .detector()
            .analyze(questions);

        if findings.is_clean()
        {
            return Ok(None);
        }

        debug!(
            exact = findings.exact.len(),
            concentrated = findings.concentrated.len(),
            flagged = findings.flagged.len(),
            "findings"
        );

        let used = self.seed_used(questions, &findings.flagged);
        self.rebuild(questions, file, &findings.flagged, used, rng)
            .map(Some)
    }

    /// Load, repair and (unless `dry_run`) rewrite one bank file.
    ///
    /// A clean file is never rewritten, so running twice is a no-op.
    #[instrument(skip_all, fields(path = %path.display(), dry_run = dry_run))]
    pub fn fix_file(
        &self,
        path: &Path,
        dry_run: bool,
        rng: &mut dyn RngCore,
    ) -> Result<FixReport, BankError>
    {
        let mut file = BankFile::load(path)?;
        let total = file.len();

        let Some(outcome) = self
            .fix_questions(&file.doc.questions, &file.id, rng)
            .map_err(|reason| BankError::Verification { path: path.to_path_buf(), reason })?
        else
        {
            debug!("clean");
            return Ok(FixReport::clean(path, total));
        };

        let report = FixReport {
            path: path.to_path_buf(),
            total,
            fixed: outcome.fixed,
            fallbacks: outcome.fallbacks,
            still_duplicate: outcome.still_duplicate,
            written: !dry_run,
        };

        file.doc
            .questions = outcome.questions;
        if !dry_run
        {
            file.save()?;
        }

        info!(fixed = report.fixed, fallbacks = report.fallbacks, written = report.written, "fixed");
        Ok(report)
    }
}

/// Same length as the input and no repeated content key.
pub fn verify(
    expected: usize,
    questions: &[Question],
) -> Result<(), VerifyFailure>
{
    if questions.len() != expected
    {
        return Err(VerifyFailure::LengthChanged { expected, actual: questions.len() });
    }

    let mut seen: std::collections::HashMap<NormalizedKey, usize> =
        std::collections::HashMap::with_capacity(questions.len());

    for (i, q) in questions
        .iter()
        .enumerate()
    {
        let key = normalize(&q.content);
        if let Some(&first) = seen.get(&key)
        {
            return Err(VerifyFailure::DuplicateKey { key, first, second: i });
        }
        seen.insert(key, i);
    }

    Ok(())
}
