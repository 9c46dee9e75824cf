//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `SeriesError`: Malformed return series (duplicate dates, non-finite values)
//! - `TableError`: Malformed date-indexed tables
//! - `WeightsError`: Malformed weight mappings
//!
//! Every variant here is a caller contract violation. Insufficient data is
//! never reported through these types; the numeric routines return explicit
//! `None`, `0.0` or empty values for that case instead.

use thiserror::Error;

/// Date-related errors.
///
/// # Examples
/// ```
/// use slice_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Errors raised while constructing a return series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Two points in the same series share a date.
    #[error("Duplicate date {date} in series '{series}'")]
    DuplicateDate {
        /// Series identifier
        series: String,
        /// Offending date (ISO-8601)
        date: String,
    },

    /// A return value is NaN or infinite.
    #[error("Non-finite value {value} on {date} in series '{series}'")]
    NonFiniteValue {
        /// Series identifier
        series: String,
        /// Offending date (ISO-8601)
        date: String,
        /// Offending value
        value: f64,
    },
}

/// Errors raised while constructing or querying a [`DateTable`](super::DateTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two rows share a date.
    #[error("Duplicate date in table: {0}")]
    DuplicateDate(String),

    /// Two columns share a name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A row does not have one cell per column.
    #[error("Row {date} has {actual} values, expected {expected}")]
    RaggedRow {
        /// Row date (ISO-8601)
        date: String,
        /// Number of columns in the table
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// A lookup referenced a column the table does not have.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A cell holds NaN or an infinite value.
    #[error("Non-finite value in column '{column}' on {date}")]
    NonFiniteValue {
        /// Column name
        column: String,
        /// Row date (ISO-8601)
        date: String,
    },
}

/// Errors raised while constructing a [`Weights`](super::Weights) mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightsError {
    /// The same identifier appears twice.
    #[error("Duplicate weight for '{0}'")]
    DuplicateId(String),

    /// A weight is NaN or infinite.
    #[error("Non-finite weight for '{0}'")]
    NonFiniteWeight(String),
}
