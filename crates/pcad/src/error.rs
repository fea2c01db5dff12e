//! Error types for the validation facade.

use thiserror::Error;

/// Errors raised when input geometry violates the caller contract.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A record carries a NaN or infinite coordinate.
    #[error("{record} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Display form of the offending record id.
        record: String,
    },

    /// A record carries a zero or negative dimension.
    #[error("{record} has a non-positive {dimension}: {value}")]
    NonPositiveDimension {
        /// Display form of the offending record id.
        record: String,
        /// Which dimension is out of range.
        dimension: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
