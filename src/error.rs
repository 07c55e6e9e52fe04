//! Error types for sample data generation.

use thiserror::Error;

/// Errors raised while configuring, assembling or writing a corpus.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Writing the corpus file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration cannot produce a corpus
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sample data operations.
pub type Result<T> = std::result::Result<T, SampleError>;
