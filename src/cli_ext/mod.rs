//! Command handlers and the plumbing they share: input discovery, progress,
//! colors, the random source, and batch exit status.

pub mod cross_cmd;
pub mod fix_cmd;
pub mod scan_cmd;
pub mod verify_cmd;

use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::cli::{AppContext, Inputs};
use crate::infra::config::{Config, load_config};
use crate::infra::walk::BankWalker;

/// Config plus the bank files a command should touch.
pub struct Session
{
    pub config: Config,
    pub files: Vec<PathBuf>,
}

impl Session
{
    pub fn open(
        inputs: &Inputs,
        ctx: &AppContext,
    ) -> Result<Self>
    {
        let config = load_config(ctx.config.as_deref())?;

        let roots = if inputs.paths.is_empty()
        {
            vec![config.questions_dir()]
        }
        else
        {
            inputs.paths.clone()
        };

        if let Some(missing) = roots
            .iter()
            .find(|p| !p.exists())
        {
            anyhow::bail!("{} does not exist", missing.display());
        }

        let walker = BankWalker::new(&config.exclude)?
            .with_recursive(inputs.recursive || config.recursive);
        let files = walker.expand(&roots);

        if files.is_empty()
        {
            warn!(roots = ?roots, "no bank files found");
        }
        debug!(files = files.len(), "session opened");

        Ok(Self { config, files })
    }
}

/// Progress bar over `len` files; hidden in quiet mode.
pub fn progress(
    len: usize,
    ctx: &AppContext,
) -> ProgressBar
{
    if ctx.quiet
    {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Seeded when asked, thread RNG otherwise.
pub fn make_rng(seed: Option<u64>) -> Box<dyn RngCore>
{
    match seed
    {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    }
}

/// Status-line coloring that honors `--no-color`.
#[derive(Clone, Copy)]
pub struct Paint
{
    enabled: bool,
}

impl Paint
{
    pub fn new(ctx: &AppContext) -> Self
    {
        Self { enabled: !ctx.no_color }
    }

    pub fn ok(
        self,
        s: &str,
    ) -> String
    {
        if self.enabled { s.green().to_string() } else { s.to_string() }
    }

    pub fn warn(
        self,
        s: &str,
    ) -> String
    {
        if self.enabled { s.yellow().to_string() } else { s.to_string() }
    }

    pub fn err(
        self,
        s: &str,
    ) -> String
    {
        if self.enabled { s.red().bold().to_string() } else { s.to_string() }
    }

    pub fn dim(
        self,
        s: &str,
    ) -> String
    {
        if self.enabled { s.dimmed().to_string() } else { s.to_string() }
    }
}

/// Non-zero exit when any file of the batch failed.
pub fn batch_status(
    failed: usize,
    total: usize,
    what: &str,
) -> Result<()>
{
    if failed > 0
    {
        anyhow::bail!("{failed} of {total} files could not be {what}");
    }
    Ok(())
}
