//! Shell completion generation using clap_complete.

use anyhow::{Context, Result};
use clap::{Command, CommandFactory};
use clap_complete::{Shell as CompletionShell, generate, generate_to};
use std::{fs, io};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "qbank";

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Completion script for `shell` as a string.
pub fn render(shell: Shell) -> Result<String> {
    let mut cmd: Command = Cli::command();
    let mut buf = Vec::new();
    generate(CompletionShell::from(shell), &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf).context("completion script is not UTF-8")
}

/// Writes to `--out-dir` when given, stdout otherwise.
pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let dir = match args.out_dir {
        Some(dir) if !args.stdout => dir,
        _ => {
            let mut cmd: Command = Cli::command();
            generate(CompletionShell::from(args.shell), &mut cmd, BIN_NAME, &mut io::stdout());
            return Ok(());
        }
    };

    if ctx.dry_run {
        println!("DRY RUN: would write {:?} completions into {}", args.shell, dir.display());
        return Ok(());
    }

    fs::create_dir_all(&dir).context("create --out-dir")?;
    let mut cmd: Command = Cli::command();
    let path = generate_to(CompletionShell::from(args.shell), &mut cmd, BIN_NAME, &dir)
        .context("generate completion file")?;

    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}
