//! Duplicates that span files.
//!
//! The same content appearing in two different bank files is reported as one
//! group. Repair keeps the occurrence in the first file (walk order) and
//! regenerates the rest, reserving every key already used anywhere so a
//! replacement can't collide with another file either.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::VerifyFailure;
use crate::core::normalize::{NormalizedKey, normalize};
use crate::core::rewrite::Engine;
use crate::infra::io::BankFile;

/// One position in one loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence
{
    pub file: usize,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossFileGroup
{
    pub key: NormalizedKey,
    /// In walk order; the first is kept.
    pub occurrences: Vec<Occurrence>,
    /// Number of distinct files involved.
    pub files: usize,
}

/// Groups of content shared by two or more files, largest first.
pub fn find_cross_file_duplicates(files: &[BankFile]) -> Vec<CrossFileGroup>
{
    let mut by_key: IndexMap<NormalizedKey, Vec<Occurrence>> = IndexMap::new();

    for (f, file) in files
        .iter()
        .enumerate()
    {
        for (i, q) in file
            .doc
            .questions
            .iter()
            .enumerate()
        {
            by_key
                .entry(normalize(&q.content))
                .or_default()
                .push(Occurrence { file: f, index: i });
        }
    }

    let mut groups: Vec<CrossFileGroup> = by_key
        .into_iter()
        .filter_map(|(key, occurrences)| {
            let files = occurrences
                .iter()
                .map(|o| o.file)
                .collect::<BTreeSet<_>>()
                .len();
            (files > 1).then_some(CrossFileGroup { key, occurrences, files })
        })
        .collect();

    // Stable: ties keep first-seen order
    groups.sort_by(|a, b| {
        b.occurrences
            .len()
            .cmp(&a.occurrences.len())
    });
    groups
}

/// Positions to regenerate, per file: every occurrence outside the group's
/// first file. Same-file repeats inside the kept file are left for `fix`.
pub fn replacement_plan(groups: &[CrossFileGroup]) -> BTreeMap<usize, BTreeSet<usize>>
{
    let mut plan: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();

    for g in groups
    {
        let Some(keep) = g
            .occurrences
            .first()
            .map(|o| o.file)
        else
        {
            continue;
        };

        for o in g
            .occurrences
            .iter()
            .filter(|o| o.file != keep)
        {
            plan.entry(o.file)
                .or_default()
                .insert(o.index);
        }
    }

    plan
}

/// Per-file result of a cross-file repair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossFileFix
{
    pub file: usize,
    pub replaced: usize,
    pub fallbacks: usize,
}

#[derive(Debug, Default)]
pub struct CrossFileOutcome
{
    pub groups: Vec<CrossFileGroup>,
    /// Files whose questions were rebuilt in memory (caller persists them).
    pub repaired: Vec<CrossFileFix>,
    pub failed: Vec<(usize, VerifyFailure)>,
}

/// Detect and repair in memory. Files in `repaired` have new contents.
pub fn repair_cross_file(
    engine: &Engine,
    files: &mut [BankFile],
    rng: &mut dyn RngCore,
) -> CrossFileOutcome
{
    let groups = find_cross_file_duplicates(files);
    if groups.is_empty()
    {
        return CrossFileOutcome::default();
    }

    let plan = replacement_plan(&groups);
    debug!(groups = groups.len(), files = plan.len(), "cross-file plan");

    // Every key in the batch is off limits for replacements
    let mut global: BTreeSet<NormalizedKey> = files
        .iter()
        .flat_map(|f| {
            f.doc
                .questions
                .iter()
        })
        .map(|q| normalize(&q.content))
        .collect();

    let mut outcome = CrossFileOutcome { groups, ..Default::default() };

    for (f, flagged) in plan
    {
        let file = &mut files[f];
        let mut used = engine.seed_used(&file.doc.questions, &flagged);
        for key in &global
        {
            used.reserve_key(key.clone());
        }

        match engine.rebuild(&file.doc.questions, &file.id, &flagged, used, rng)
        {
            Ok(rebuilt) =>
            {
                global.extend(
                    rebuilt
                        .questions
                        .iter()
                        .map(|q| normalize(&q.content)),
                );
                info!(path = %file.path.display(), replaced = rebuilt.fixed, "cross-file repair");
                outcome
                    .repaired
                    .push(CrossFileFix { file: f, replaced: rebuilt.fixed, fallbacks: rebuilt.fallbacks });
                file.doc
                    .questions = rebuilt.questions;
            }
            Err(e) => outcome
                .failed
                .push((f, e)),
        }
    }

    outcome
}
