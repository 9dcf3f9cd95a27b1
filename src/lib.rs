//! **qbank** - Batch maintenance for static quiz question banks
//!
//! Finds exact and pseudo-duplicate questions in `{grade}_{difficulty}_{subject}.json`
//! files and replaces them with template-generated questions, keeping every file's
//! size and sequential ids intact.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Command handlers for scan, fix, cross-file and verify
pub mod cli_ext;
pub use cli_ext::cross_cmd::run as cross_file_run;
pub use cli_ext::fix_cmd::run as fix_run;
pub use cli_ext::scan_cmd::run as scan_run;
pub use cli_ext::verify_cmd::run as verify_run;

/// Domain model and the detection/repair pipeline
pub mod core {
    /// Error taxonomy for loading, saving and verifying bank files
    pub mod error;
    pub use error::{BankError, VerifyFailure};

    /// Question records, file identities and the two on-disk layouts
    pub mod question;
    pub use question::{BankFileId, Difficulty, Question, QuestionDoc, Subject};

    /// Content normalization into comparison keys
    pub mod normalize;
    pub use normalize::{NormalizedKey, normalize};

    /// Rule-based question type classification
    pub mod classify;
    pub use classify::{Classifier, QuestionType};

    /// Parameterized question templates per subject and difficulty
    pub mod template;
    pub use template::{Template, TemplateRegistry};

    /// Unique replacement generation with retry and fallback
    pub mod generate;
    pub use generate::{Generated, Generator, UsedSet};

    /// Exact and type-concentration duplicate detection
    pub mod detect;
    pub use detect::{Detector, Findings};

    /// Per-file fix pass: rebuild, re-index, verify, persist
    pub mod rewrite;
    pub use rewrite::{Engine, EngineSettings, FixReport};

    /// Duplicates that span several bank files
    pub mod crossfile;
    pub use crossfile::{find_cross_file_duplicates, repair_cross_file};

    /// Label, option and content quality checks
    pub mod audit;
    pub use audit::{Finding, Issue, audit_questions, grade_flags, relabel};
}

/// Infrastructure - configuration, file I/O, discovery and helpers
pub mod infra {
    /// Layered configuration (defaults, qbank.toml, QBANK_* env)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Bank file loading and atomic saves
    pub mod io;
    pub use io::BankFile;

    /// Bank file discovery with exclude globs
    pub mod walk;
    pub use walk::BankWalker;

    /// Console text and path helpers
    pub mod utils;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{Engine, EngineSettings};
pub use crate::infra::{BankFile, BankWalker, Config, load_config};
