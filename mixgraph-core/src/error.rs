//! Common error types for mixgraph

use thiserror::Error;

/// Common result type for mixgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the mixgraph crates
#[derive(Error, Debug)]
pub enum Error {
    /// Vocabulary loading or validation error; fatal, since every
    /// downstream filter depends on the vocabulary
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
