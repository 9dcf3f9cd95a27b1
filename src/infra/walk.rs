//! Filepath: src/infra/walk.rs
//! Bank file discovery.
//! - Only `*.json` files are candidates
//! - Exclude globs (e.g. `manifest.json`) match on the file name
//! - Top level only unless recursion is requested
//! - Hidden files are skipped; ignore files are not consulted
//! - Deterministic ordering for stable reports and tests
//!
//! Backed by the `ignore` crate's walker and `globset`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Walker that yields candidate question bank files.
pub struct BankWalker
{
    /// Compiled exclude patterns, matched against file names
    exclude: GlobSet,

    /// Descend into subdirectories; default false
    recursive: bool,
}

impl BankWalker
{
    /// Build a walker with file-name exclude patterns
    /// (e.g. "manifest.json", "*.bak.json").
    pub fn new(exclude: &[String]) -> Result<Self>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in exclude
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self { exclude: builder.build()?, recursive: false })
    }

    /// (Optional) Descend into subdirectories.
    pub fn with_recursive(
        mut self,
        recursive: bool,
    ) -> Self
    {
        self.recursive = recursive;
        self
    }

    /// True for `*.json` files whose name is not excluded.
    fn is_candidate(
        &self,
        path: &Path,
    ) -> bool
    {
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
        else
        {
            return false;
        };

        name.ends_with(".json") && !self
            .exclude
            .is_match(name)
    }

    /// Candidate files under `root`, sorted.
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let mut b = WalkBuilder::new(root.as_ref());

        // Plain directory listing: no ignore files, but skip dotfiles
        b.standard_filters(false);
        b.hidden(true);
        b.max_depth(if self.recursive { None } else { Some(1) });

        let mut out: Vec<PathBuf> = b
            .build()
            // Drop entries with IO errors
            .filter_map(|res| res.ok())
            // Keep only regular files
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|p| self.is_candidate(p))
            .collect();

        // Deterministic order
        out.sort();

        out
    }

    /// Expand command-line inputs: directories are walked, files are taken
    /// as given (even if an exclude pattern would match). Duplicates collapse.
    pub fn expand(
        &self,
        inputs: &[PathBuf],
    ) -> Vec<PathBuf>
    {
        let mut out = Vec::new();

        for input in inputs
        {
            if input.is_dir()
            {
                out.extend(self.walk_files(input));
            }
            else
            {
                out.push(input.clone());
            }
        }

        out.sort();
        out.dedup();

        out
    }
}
