//! File-scoped failures. None of these halt a multi-file batch; the runner
//! reports them and moves on to the next file.

use std::path::PathBuf;

use crate::core::normalize::NormalizedKey;

#[derive(Debug, thiserror::Error)]
pub enum BankError
{
    #[error("I/O failure on {path}: {source}")]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid question file: {source}")]
    Parse
    {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize {path}: {source}")]
    Serialize
    {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot derive grade/difficulty/subject from file name `{0}`")]
    FileName(String),

    #[error("refusing to write {path}: {reason}")]
    Verification
    {
        path: PathBuf,
        reason: VerifyFailure,
    },
}

/// Post-assembly invariant violations. The only hard failure of a fix pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyFailure
{
    #[error("pool size changed from {expected} to {actual}")]
    LengthChanged
    {
        expected: usize, actual: usize
    },

    #[error("entries {first} and {second} share the content key `{key}`")]
    DuplicateKey
    {
        key: NormalizedKey,
        first: usize,
        second: usize,
    },
}
