//! FILENAME: series/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cannot convert {from} to {to}")]
    TypeConversion { from: String, to: String },
}

pub type SeriesResult<T> = Result<T, SeriesError>;
