//! Error types for `logsift`.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Per-line problems
//! ([`EntryError`]) are always recovered by the pipeline; only
//! [`LogsiftError`] ever reaches the binary's exit code.

use thiserror::Error;

/// Application-level errors.
///
/// Maps to exit codes: [`Config`](Self::Config) and [`Toml`](Self::Toml) → exit 1,
/// [`Io`](Self::Io) → exit 2.
#[derive(Debug, Error)]
pub enum LogsiftError {
    /// Configuration error (unreadable config file, unknown mode).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading the log or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A structured-entry marker was found but the text after it could not be
/// decoded as a structured log record.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("malformed structured entry: {0}")]
    Malformed(#[from] serde_json::Error),
}
