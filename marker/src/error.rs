//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers everything that can go wrong while
//! loading graded files, building patterns from a rubric, and reading or writing JSON reports.
//!
//! None of these errors is fatal to a grading run: callers turn them into zero-valued
//! placeholder reports plus a feedback note. Only the binaries decide when an error ends the
//! process (failing to write the output artifact).
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn parse_input(data: &str) -> Result<(), MarkerError> {
//!     if data.is_empty() {
//!         return Err(MarkerError::MissingField("input data".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarkerError {
    /// I/O error (file not found, unreadable, not a regular file).
    #[error("{0}")]
    IoError(String),
    /// File exceeds the size accepted for its kind.
    #[error("File too large: {0}")]
    FileTooLarge(String),
    /// JSON is malformed or does not match the expected schema.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// A pattern or locator from the rubric could not be compiled.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    /// A required field is missing from input.
    #[error("Missing field: {0}")]
    MissingField(String),
}
