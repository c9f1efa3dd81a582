//! FILENAME: frame/src/error.rs

use series::SeriesError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("row not found: {0}")]
    RowNotFound(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("no matching observation")]
    NoMatch,

    #[error(transparent)]
    Series(#[from] SeriesError),
}

pub type FrameResult<T> = Result<T, FrameError>;
