//! Bank file I/O: read + parse, and atomic pretty-printed rewrites.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::error::BankError;
use crate::core::question::{BankFileId, QuestionDoc};

/// A loaded bank file: where it lives, what it is, and what it holds.
#[derive(Debug, Clone)]
pub struct BankFile
{
    pub path: PathBuf,
    pub id: BankFileId,
    pub doc: QuestionDoc,
}

impl BankFile
{
    /// Derive the identity from the file name, then read and parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BankError>
    {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| {
                n.to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_default();
        let id = BankFileId::from_file_name(&name)?;

        let text = std::fs::read_to_string(path)
            .map_err(|source| BankError::Io { path: path.to_path_buf(), source })?;
        let doc = QuestionDoc::parse(&text)
            .map_err(|source| BankError::Parse { path: path.to_path_buf(), source })?;

        Ok(Self { path: path.to_path_buf(), id, doc })
    }

    pub fn len(&self) -> usize
    {
        self.doc
            .questions
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.doc
            .questions
            .is_empty()
    }

    /// Serialize and atomically replace the file on disk.
    pub fn save(&self) -> Result<(), BankError>
    {
        let text = self
            .doc
            .to_json_pretty()
            .map_err(|source| BankError::Serialize { path: self.path.clone(), source })?;
        write_atomic(&self.path, text.as_bytes())
    }
}

/// Write to a sibling temp file, then rename over `path`.
/// A crash mid-write leaves the original untouched.
pub fn write_atomic(
    path: &Path,
    bytes: &[u8],
) -> Result<(), BankError>
{
    let io_err = |source| BankError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent()
    {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes)
        .map_err(io_err)?;
    tmp.as_file()
        .sync_all()
        .map_err(io_err)?;
    tmp.persist(path)
        .map_err(|e| io_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests
{
    use tempfile::TempDir;

    use super::*;
    use crate::core::question::{Difficulty, Subject};

    const BANK: &str = r#"[
  {
    "_id": "grade4_easy_math_001",
    "content": "What is 2 + 3?",
    "options": [
      "4",
      "5",
      "6",
      "7"
    ],
    "correctAnswer": "5",
    "subject": "Mathematics",
    "grade": 4,
    "difficulty": "easy",
    "explanation": "2 + 3 = 5",
    "type": "multiple_choice"
  }
]
"#;

    #[test]
    fn load_and_save_round_trip() -> anyhow::Result<()>
    {
        let dir = TempDir::new()?;
        let path = dir
            .path()
            .join("4_easy_math.json");
        std::fs::write(&path, BANK)?;

        let file = BankFile::load(&path)?;
        assert_eq!(file.id, BankFileId::new(4, Difficulty::Easy, Subject::Math));
        assert_eq!(file.len(), 1);

        file.save()?;
        assert_eq!(std::fs::read_to_string(&path)?, BANK);
        Ok(())
    }

    #[test]
    fn errors_carry_the_path() -> anyhow::Result<()>
    {
        let dir = TempDir::new()?;

        let bad_name = dir
            .path()
            .join("notes.json");
        std::fs::write(&bad_name, "[]")?;
        assert!(matches!(BankFile::load(&bad_name), Err(BankError::FileName(_))));

        let broken = dir
            .path()
            .join("4_easy_math.json");
        std::fs::write(&broken, "[{")?;
        match BankFile::load(&broken)
        {
            Err(BankError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {other:?}"),
        }

        let missing = dir
            .path()
            .join("5_easy_math.json");
        assert!(matches!(BankFile::load(&missing), Err(BankError::Io { .. })));
        Ok(())
    }

    #[test]
    fn write_side_errors_name_serialization()
    {
        use serde::ser::Error as _;

        let err = BankError::Serialize {
            path: PathBuf::from("bank/4_easy_math.json"),
            source: serde_json::Error::custom("map key must be a string"),
        };
        let text = err.to_string();
        assert!(text.starts_with("cannot serialize bank/4_easy_math.json"), "{text}");
        assert!(!text.contains("not a valid question file"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() -> anyhow::Result<()>
    {
        let dir = TempDir::new()?;
        let path = dir
            .path()
            .join("1_easy_math.json");
        write_atomic(&path, b"[]\n")?;
        write_atomic(&path, b"[ ]\n")?;

        let entries: Vec<_> = std::fs::read_dir(dir.path())?.collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(std::fs::read_to_string(&path)?, "[ ]\n");
        Ok(())
    }
}
