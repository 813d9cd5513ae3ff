//! # Parsers
//!
//! This module is responsible for parsing the auxiliary inputs of the final report.
//!
//! The parsers implemented in this module adhere to the `Parser` trait,
//! ensuring a consistent interface for parsing different input formats.
//!
//! The available parsers are:
//! - [`test_log_parser`]: For reading pass/fail counts from a test runner transcript.

pub mod test_log_parser;
