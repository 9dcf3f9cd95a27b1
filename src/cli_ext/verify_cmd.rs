//! `qbank verify`: quality audit, with optional label repair.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{Paint, Session, batch_status, progress};
use crate::cli::{AppContext, VerifyArgs};
use crate::core::audit::{Finding, audit_questions, relabel};
use crate::infra::io::BankFile;
use crate::infra::utils::{PathUtils, TextUtils};

#[derive(Serialize)]
struct FileAudit
{
    path: PathBuf,
    total: usize,
    relabeled: usize,
    findings: Vec<Finding>,
}

#[instrument(skip_all)]
pub fn run(
    args: VerifyArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let session = Session::open(&args.inputs, ctx)?;
    let min_len = args
        .min_length
        .unwrap_or(
            session
                .config
                .verify
                .min_content_length,
        );
    let paint = Paint::new(ctx);

    let pb = progress(session.files.len(), ctx);
    let mut audits = Vec::new();
    let mut failed = 0;

    for path in &session.files
    {
        pb.set_message(PathUtils::short(path));
        pb.inc(1);

        let mut file = match BankFile::load(path)
        {
            Ok(f) => f,
            Err(e) =>
            {
                warn!(error = %e, "skipping file");
                pb.suspend(|| eprintln!("{} {e}", paint.err("✗")));
                failed += 1;
                continue;
            }
        };

        let mut relabeled = 0;
        if args.fix_labels
        {
            relabeled = relabel(&file.id, &mut file.doc.questions);
            if relabeled > 0 && !ctx.dry_run
            {
                if let Err(e) = file.save()
                {
                    warn!(error = %e, "write failed");
                    pb.suspend(|| eprintln!("{} {e}", paint.err("✗")));
                    failed += 1;
                    continue;
                }
                info!(path = %path.display(), relabeled, "labels rewritten");
            }
        }

        let findings = audit_questions(&file.id, &file.doc.questions, min_len);
        audits.push(FileAudit { path: path.clone(), total: file.len(), relabeled, findings });
    }
    pb.finish_and_clear();

    let issues: usize = audits
        .iter()
        .map(|a| a.findings.len())
        .sum();

    if args.json
    {
        let text = serde_json::to_string_pretty(&audits).context("Failed to serialize audit")?;
        println!("{text}");
    }
    else if !ctx.quiet
    {
        for a in &audits
        {
            if a.relabeled > 0
            {
                let verb = if ctx.dry_run { "would relabel" } else { "relabeled" };
                println!(
                    "{} {}: {verb} {}",
                    paint.ok("✓"),
                    PathUtils::short(&a.path),
                    TextUtils::plural(a.relabeled, "question")
                );
            }
            for f in &a.findings
            {
                println!(
                    "{} {} {} {}",
                    paint.warn("!"),
                    PathUtils::short(&a.path),
                    paint.dim(&format!("#{} {}", f.index + 1, f.id)),
                    f.issue
                );
            }
        }

        if issues == 0
        {
            println!("{} {} verified", paint.ok("✓"), TextUtils::plural(audits.len(), "file"));
        }
        else
        {
            println!(
                "{} {} in {}",
                paint.warn("!"),
                TextUtils::plural(issues, "issue"),
                TextUtils::plural(audits.len(), "file")
            );
        }
    }

    batch_status(failed, session.files.len(), "verified")?;
    if issues > 0
    {
        anyhow::bail!("{} found", TextUtils::plural(issues, "issue"));
    }
    Ok(())
}
