//! Error types and exit codes for docblock-engine

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for docblock-engine operations
///
/// Malformed declaration lines are never errors: the parser degrades to a
/// partial symbol. Configuration problems fall back to defaults. The only
/// failure the core reports is an unknown language id.
#[derive(Error, Debug)]
pub enum DocblockError {
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocblockError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Unsupported language
    /// - 4: Output serialization failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
            Self::UnsupportedLanguage { .. } => ExitCode::from(2),
            Self::Serialization { .. } => ExitCode::from(4),
        }
    }
}

/// Result type alias for docblock-engine operations
pub type Result<T> = std::result::Result<T, DocblockError>;
