//! Error types for the join engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// A row that is structurally malformed or carries an undecodable value.
///
/// Returned by the pure parse functions, which know nothing about row
/// positions. The caller attaches the line number when wrapping it into
/// [`EngineError::DataQuality`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataQualityError {
    /// Fewer fields than the schema requires
    #[error("wrong column count: expected at least {expected}, found {found}")]
    WrongColumnCount { expected: usize, found: usize },

    /// A field could not be decoded into its typed value
    #[error("cannot decode {field}: {reason}")]
    Decode {
        /// Column name
        field: &'static str,
        /// Parser message
        reason: String,
    },

    /// The row is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    Encoding(String),
}

impl DataQualityError {
    pub(crate) fn decode(field: &'static str, reason: impl ToString) -> Self {
        DataQualityError::Decode {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Errors that can occur while running the query.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to read an input or write the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open a configured input file
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV output error
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed input row; aborts the whole run
    #[error("data quality error in {input} row {row}: {source}")]
    DataQuality {
        input: &'static str,
        row: usize,
        source: DataQualityError,
    },

    /// Category total no longer fits in 64 bits
    #[error("sum_amount overflow for transaction_category_id {category}")]
    SumOverflow { category: u32 },
}
