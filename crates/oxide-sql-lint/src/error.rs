//! Error types for the lint front end.

use std::path::PathBuf;

/// Errors that stop a lint run.
///
/// Syntax errors in the checked SQL are not errors of this kind: they are
/// reported as diagnostics. [`LintError::Syntax`] only summarises them for
/// commands that print something other than the diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Reading an input or configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the report or decoding the configuration failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be used.
    #[error("Invalid configuration '{path}': {message}")]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A command-line option or its environment variable has an unusable
    /// value.
    #[error("Invalid option '{name}': {message}")]
    InvalidOption {
        /// Long name of the option.
        name: &'static str,
        /// What was wrong with the value.
        message: String,
    },

    /// An input had syntax errors.
    #[error("{path}: {count} syntax error(s)")]
    Syntax {
        /// Name of the input, `-` for stdin.
        path: String,
        /// Number of diagnostics.
        count: usize,
    },
}

/// Result type for lint operations.
pub type Result<T> = std::result::Result<T, LintError>;
