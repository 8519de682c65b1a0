//! Error types shared across the crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed dataset or malformed input vectors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The correlation coefficient is undefined for the given vectors
    /// (e.g. one of them has zero variance).
    #[error("Degenerate {method} correlation: {reason}")]
    DegenerateCorrelation { method: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
