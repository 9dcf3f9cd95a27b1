use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,             // global --quiet
    pub no_color: bool,          // global --no-color
    pub dry_run: bool,           // global --dry-run
    pub config: Option<PathBuf>, // global --config
}

#[derive(Parser)]
#[command(name = "qbank")]
#[command(
    about = "Find and repair duplicate and pseudo-duplicate questions in static quiz question banks"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Analyze and generate, but never write files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of ./qbank.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report exact duplicates and over-concentrated question types
    Scan(ScanArgs),

    /// Replace duplicates within each bank file
    Fix(FixArgs),

    /// Replace content that is duplicated across bank files
    CrossFile(CrossFileArgs),

    /// Audit labels, options, answers and content of every question
    Verify(VerifyArgs),

    /// Initialize a qbank.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to look for bank files
#[derive(Debug, Clone, Args)]
pub struct Inputs {
    /// Bank files or directories (defaults to `questions_dir` from config)
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Debug, Parser)]
pub struct ScanArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Distinct questions of one type allowed per file
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Emit findings as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct FixArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Distinct questions of one type allowed per file
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Template draws per replaced question before falling back
    #[arg(long)]
    pub retries: Option<usize>,

    /// Seed for reproducible replacements
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit per-file reports as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct CrossFileArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Seed for reproducible replacements
    #[arg(long)]
    pub seed: Option<u64>,

    /// Template draws per replaced question before falling back
    #[arg(long)]
    pub retries: Option<usize>,

    /// Report groups without replacing anything
    #[arg(long)]
    pub report_only: bool,
}

#[derive(Debug, Parser)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Rewrite mismatched subject/grade/difficulty fields
    #[arg(long)]
    pub fix_labels: bool,

    /// Minimum content length in characters
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Emit findings as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Directory to write qbank.toml into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory for completion files
    #[arg(long, conflicts_with = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Write completion script to stdout
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
