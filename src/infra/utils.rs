//! Filepath: src/infra/utils.rs
//! Small text and path helpers for console output.

use std::path::Path;

/// Display helpers for question content
pub struct TextUtils;

impl TextUtils
{
    /// First `max` chars of `s` on one line, with `…` if cut.
    /// Counts chars, not bytes, so multi-byte symbols (², ÷, °) never split.
    pub fn preview(
        s: &str,
        max: usize,
    ) -> String
    {
        // Collapse newlines and runs of spaces first
        let flat = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if flat
            .chars()
            .count()
            <= max
        {
            return flat;
        }

        let mut out: String = flat
            .chars()
            .take(max.saturating_sub(1))
            .collect();
        out.push('…');
        out
    }

    /// `1 file` / `3 files`
    pub fn plural(
        n: usize,
        noun: &str,
    ) -> String
    {
        if n == 1 { format!("{n} {noun}") } else { format!("{n} {noun}s") }
    }
}

/// Path display helpers
pub struct PathUtils;

impl PathUtils
{
    /// File name for reports, falling back to the full path
    pub fn short(path: &Path) -> String
    {
        path.file_name()
            .map(|n| {
                n.to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_else(|| {
                path.display()
                    .to_string()
            })
    }
}
