//! Data-layer error types.

use thiserror::Error;

/// Errors raised while turning raw columns into a validated bar series.
///
/// Every variant is fatal for the series it was raised on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    /// A required input field is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A column does not have the same length as `time`.
    #[error("Column {column} has {actual} values, expected {expected}")]
    ColumnLength {
        /// Name of the offending column.
        column: String,
        /// Length of the `time` column.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// Timestamp does not strictly increase.
    #[error("Non-monotonic timestamp at index {index}: {current} <= {previous}")]
    NonMonotonicTime {
        /// Index of the offending bar.
        index: usize,
        /// Timestamp of the preceding bar.
        previous: i64,
        /// Timestamp of the offending bar.
        current: i64,
    },

    /// Timestamp repeats the preceding one.
    #[error("Duplicate timestamp at index {index}: {timestamp}")]
    DuplicateTimestamp {
        /// Index of the second occurrence.
        index: usize,
        /// Repeated timestamp.
        timestamp: i64,
    },

    /// Data violated a bar invariant (OHLC ordering, negative counts).
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Symbol is empty.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),
}
