use anyhow::Result;
use clap::Parser;
use qbank::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        config: cli.config.clone(),
    };

    match cli.command {
        Commands::Scan(args) => qbank::scan_run(args, &ctx),
        Commands::Fix(args) => qbank::fix_run(args, &ctx),
        Commands::CrossFile(args) => qbank::cross_file_run(args, &ctx),
        Commands::Verify(args) => qbank::verify_run(args, &ctx),
        Commands::Init(args) => qbank::infra::config::init(args, &ctx),
        Commands::Completions(args) => qbank::completion::run(args, &ctx),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
