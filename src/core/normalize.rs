//! Content normalization: the comparison key for exact-duplicate detection.
//!
//! Only cosmetic differences collapse here. Two problems that differ in their
//! numbers keep distinct keys; the classifier handles that kind of sameness.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Version/variant/id annotations appended by earlier bulk edits.
static ANNOTATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
          \(\s*(?:version|variant)\s*\#?\s*\d+\s*\)
        | \[\s*v(?:ersion)?\s*\d+\s*\]
        | \(\s*(?:question\s+)?id\s*:[^)]*\)",
    )
    .expect("annotation pattern compiles")
});

/// Derived comparison key. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey
{
    pub fn as_str(&self) -> &str
    {
        &self.0
    }
}

impl fmt::Display for NormalizedKey
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(&self.0)
    }
}

/// Strip annotations, collapse whitespace runs, trim, lower-case.
pub fn normalize(content: &str) -> NormalizedKey
{
    let stripped = ANNOTATIONS.replace_all(content, " ");

    let collapsed = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedKey(collapsed.to_lowercase())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn version_annotations_collapse()
    {
        assert_eq!(
            normalize("Solve x²+3x+2=0 (Version 539)"),
            normalize("Solve x²+3x+2=0 (Version 264)")
        );
        assert_eq!(normalize("Solve x²+3x+2=0 (Version 539)").as_str(), "solve x²+3x+2=0");
    }

    #[test]
    fn other_annotations_and_spacing()
    {
        let plain = normalize("What is 3 + 4?");
        assert_eq!(normalize("  What   is 3 +\t4?  (variant 2)"), plain);
        assert_eq!(normalize("What is 3 + 4? [v12]"), plain);
        assert_eq!(normalize("What is 3 + 4? (Question ID: 1719_55_3)"), plain);
        assert_eq!(normalize("WHAT IS 3 + 4? (ID: abc)"), plain);
    }

    #[test]
    fn different_numbers_stay_distinct()
    {
        assert_ne!(normalize("What is 3 + 4?"), normalize("What is 3 + 5?"));
    }

    #[test]
    fn ordinary_parentheses_survive()
    {
        assert_eq!(normalize("What is sin(30°)?").as_str(), "what is sin(30°)?");
        assert_eq!(
            normalize("Find f(2) (use the rule above)").as_str(),
            "find f(2) (use the rule above)"
        );
    }

    #[test]
    fn normalization_is_idempotent()
    {
        let once = normalize("  Mixed   CASE (Version 7) text ");
        assert_eq!(normalize(once.as_str()), once);
    }
}
