//! `qbank fix`: per-file duplicate repair.

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use super::{Paint, Session, batch_status, make_rng, progress};
use crate::cli::{AppContext, FixArgs};
use crate::core::rewrite::{Engine, FixReport};
use crate::infra::utils::{PathUtils, TextUtils};

#[instrument(skip_all)]
pub fn run(
    args: FixArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let session = Session::open(&args.inputs, ctx)?;
    let engine = Engine::builtin(
        session
            .config
            .engine_settings(args.threshold, args.retries),
    );
    let mut rng = make_rng(args.seed);
    let paint = Paint::new(ctx);

    if ctx.dry_run && !ctx.quiet && !args.json
    {
        println!("{}", paint.warn("DRY RUN: no files will be written"));
    }

    let pb = progress(session.files.len(), ctx);
    let mut reports: Vec<FixReport> = Vec::new();
    let mut failed = 0;

    for path in &session.files
    {
        pb.set_message(PathUtils::short(path));
        match engine.fix_file(path, ctx.dry_run, rng.as_mut())
        {
            Ok(report) => reports.push(report),
            Err(e) =>
            {
                warn!(path = %path.display(), error = %e, "fix failed");
                pb.suspend(|| eprintln!("{} {e}", paint.err("✗")));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let fixed: usize = reports
        .iter()
        .map(|r| r.fixed)
        .sum();
    let fallbacks: usize = reports
        .iter()
        .map(|r| r.fallbacks)
        .sum();
    info!(files = reports.len(), fixed, fallbacks, failed, "fix finished");

    if args.json
    {
        let text = serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
        println!("{text}");
        return batch_status(failed, session.files.len(), "fixed");
    }

    if !ctx.quiet
    {
        for r in reports
            .iter()
            .filter(|r| r.fixed > 0)
        {
            let verb = if r.written { "replaced" } else { "would replace" };
            let mut line = format!(
                "{} {}: {verb} {} of {}",
                paint.ok("✓"),
                PathUtils::short(&r.path),
                r.fixed,
                r.total
            );
            if r.fallbacks > 0
            {
                line.push_str(&format!(" ({})", TextUtils::plural(r.fallbacks, "placeholder")));
            }
            println!("{line}");

            if r.still_duplicate > 0
            {
                println!(
                    "  {} {} still flagged after repair",
                    paint.warn("!"),
                    TextUtils::plural(r.still_duplicate, "question")
                );
            }
        }

        let clean = reports
            .iter()
            .filter(|r| r.fixed == 0)
            .count();
        println!(
            "{} {} replaced across {}, {} already clean",
            paint.ok("✓"),
            TextUtils::plural(fixed, "question"),
            TextUtils::plural(reports.len() - clean, "file"),
            clean
        );
    }

    batch_status(failed, session.files.len(), "fixed")
}
