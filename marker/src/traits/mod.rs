//!
//! Traits Module
//!
//! Core traits used throughout the marker system for extensibility and abstraction.
//!
//! - [`extractor`]: Locates the fragment of a source file belonging to one unit.
//! - [`comparator`]: Checks a fragment against a unit's required patterns.
//! - [`feedback`]: Turns a merged report into feedback messages.
//! - [`parser`]: Generic trait for parsing raw input into Rust types.

pub mod comparator;
pub mod extractor;
pub mod feedback;
pub mod parser;
