//! `qbank scan`: read-only duplicate report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{instrument, warn};

use super::{Paint, Session, batch_status, progress};
use crate::cli::{AppContext, ScanArgs};
use crate::core::detect::Findings;
use crate::core::rewrite::Engine;
use crate::infra::io::BankFile;
use crate::infra::utils::{PathUtils, TextUtils};

#[derive(Tabled)]
struct ScanRow
{
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Questions")]
    total: usize,
    #[tabled(rename = "Exact extra")]
    exact: usize,
    #[tabled(rename = "Over-concentrated")]
    concentrated: String,
    #[tabled(rename = "Flagged")]
    flagged: usize,
}

#[derive(Serialize)]
struct FileScan
{
    path: PathBuf,
    total: usize,
    #[serde(flatten)]
    findings: Findings,
}

#[instrument(skip_all)]
pub fn run(
    args: ScanArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let session = Session::open(&args.inputs, ctx)?;
    let engine = Engine::builtin(
        session
            .config
            .engine_settings(args.threshold, None),
    );
    let detector = engine.detector();
    let paint = Paint::new(ctx);

    let pb = progress(session.files.len(), ctx);
    let mut scans = Vec::new();
    let mut failed = 0;

    for path in &session.files
    {
        pb.set_message(PathUtils::short(path));
        match BankFile::load(path)
        {
            Ok(file) =>
            {
                let findings = detector.analyze(&file.doc.questions);
                scans.push(FileScan { path: path.clone(), total: file.len(), findings });
            }
            Err(e) =>
            {
                warn!(error = %e, "skipping file");
                pb.suspend(|| eprintln!("{} {e}", paint.err("✗")));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.json
    {
        let text = serde_json::to_string_pretty(&scans).context("Failed to serialize scan")?;
        println!("{text}");
        return batch_status(failed, session.files.len(), "scanned");
    }

    let rows: Vec<ScanRow> = scans
        .iter()
        .map(|s| ScanRow {
            file: PathUtils::short(&s.path),
            total: s.total,
            exact: s
                .findings
                .exact_extra(),
            concentrated: s
                .findings
                .concentrated
                .iter()
                .map(|g| format!("{} {}/{}", g.kind, g.indices.len(), g.kept))
                .join(", "),
            flagged: s
                .findings
                .flagged
                .len(),
        })
        .collect();

    if !rows.is_empty()
    {
        println!("{}", Table::new(rows));
    }

    if !ctx.quiet
    {
        let dirty = scans
            .iter()
            .filter(|s| !s.findings.is_clean())
            .count();
        let flagged: usize = scans
            .iter()
            .map(|s| s.findings.flagged.len())
            .sum();

        for s in scans
            .iter()
            .filter(|s| !s.findings.exact.is_empty())
        {
            for g in &s.findings.exact
            {
                println!(
                    "  {} {}× \"{}\"",
                    paint.dim(&PathUtils::short(&s.path)),
                    g.indices.len(),
                    TextUtils::preview(g.key.as_str(), 60)
                );
            }
        }

        let summary = format!(
            "{} with findings, {} to replace ({} scanned)",
            TextUtils::plural(dirty, "file"),
            TextUtils::plural(flagged, "question"),
            TextUtils::plural(scans.len(), "file")
        );
        if dirty == 0
        {
            println!("{} {summary}", paint.ok("✓"));
        }
        else
        {
            println!("{} {summary}", paint.warn("!"));
        }
    }

    batch_status(failed, session.files.len(), "scanned")
}
