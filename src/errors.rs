//! Error types for the audit.
//!
//! Only [`AuditError::CorpusDir`] and [`AuditError::Config`] abort a run.
//! The other variants are caught at the document or token boundary and
//! end up in the report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or auditing a corpus.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The corpus root could not be listed.
    #[error("cannot list corpus directory {}: {source}", path.display())]
    CorpusDir { path: PathBuf, source: io::Error },

    /// A single document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A single document is in an encoding that cannot be decoded.
    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// A single document is not well-formed markup.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A search pattern for a token could not be built.
    #[error("cannot build search pattern for {token:?}: {source}")]
    Pattern { token: String, source: regex::Error },

    /// The configuration file is unreadable or invalid.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
