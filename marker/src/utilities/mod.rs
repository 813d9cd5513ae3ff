//! # Utilities
//!
//! This module contains utility functions shared across the `marker` crate.
//!
//! Currently, this module exports the following sub-module:
//! - [`file_loader`]: Loading graded files, transcripts and stage reports, and writing JSON reports.

pub mod file_loader;
