//! `qbank cross-file`: content repeated across bank files.

use anyhow::Result;
use itertools::Itertools;
use tracing::{info, instrument, warn};

use super::{Paint, Session, batch_status, make_rng, progress};
use crate::cli::{AppContext, CrossFileArgs};
use crate::core::crossfile::{find_cross_file_duplicates, repair_cross_file};
use crate::core::rewrite::Engine;
use crate::infra::io::BankFile;
use crate::infra::utils::{PathUtils, TextUtils};

/// Groups listed in full before the rest are summarized.
const SHOWN_GROUPS: usize = 20;

#[instrument(skip_all)]
pub fn run(
    args: CrossFileArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let session = Session::open(&args.inputs, ctx)?;
    let engine = Engine::builtin(
        session
            .config
            .engine_settings(None, args.retries),
    );
    let paint = Paint::new(ctx);

    let pb = progress(session.files.len(), ctx);
    let mut files: Vec<BankFile> = Vec::new();
    let mut failed = 0;

    for path in &session.files
    {
        pb.set_message(PathUtils::short(path));
        match BankFile::load(path)
        {
            Ok(f) => files.push(f),
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

    let report_only = args.report_only;
    let (groups, outcome) = if report_only
    {
        (find_cross_file_duplicates(&files), None)
    }
    else
    {
        let mut rng = make_rng(args.seed);
        let outcome = repair_cross_file(&engine, &mut files, rng.as_mut());
        (outcome.groups.clone(), Some(outcome))
    };

    if !ctx.quiet
    {
        for g in groups
            .iter()
            .take(SHOWN_GROUPS)
        {
            let places = g
                .occurrences
                .iter()
                .map(|o| format!("{}#{}", PathUtils::short(&files[o.file].path), o.index + 1))
                .join(", ");
            println!(
                "{} \"{}\" in {}",
                paint.warn("!"),
                TextUtils::preview(g.key.as_str(), 50),
                paint.dim(&places)
            );
        }
        if groups.len() > SHOWN_GROUPS
        {
            println!("  … and {} more", groups.len() - SHOWN_GROUPS);
        }
    }

    let Some(outcome) = outcome
    else
    {
        if !ctx.quiet
        {
            println!("{} spanning files", TextUtils::plural(groups.len(), "duplicate group"));
        }
        return batch_status(failed, session.files.len(), "read");
    };

    if ctx.dry_run && !ctx.quiet
    {
        println!("{}", paint.warn("DRY RUN: repaired files were not written"));
    }

    for fix in &outcome.repaired
    {
        let file = &files[fix.file];
        if !ctx.dry_run
        {
            if let Err(e) = file.save()
            {
                warn!(error = %e, "write failed");
                eprintln!("{} {e}", paint.err("✗"));
                failed += 1;
                continue;
            }
        }
        if !ctx.quiet
        {
            println!(
                "{} {}: replaced {}",
                paint.ok("✓"),
                PathUtils::short(&file.path),
                TextUtils::plural(fix.replaced, "question")
            );
        }
    }

    for (f, reason) in &outcome.failed
    {
        eprintln!(
            "{} {}: {reason}; run `qbank fix` on it first",
            paint.err("✗"),
            PathUtils::short(&files[*f].path)
        );
        failed += 1;
    }

    info!(
        groups = groups.len(),
        repaired = outcome.repaired.len(),
        failed,
        "cross-file finished"
    );

    batch_status(failed, session.files.len(), "repaired")
}
