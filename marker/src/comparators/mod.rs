//! # Comparators
//!
//! This module provides the comparators used to decide which of a unit's required patterns
//! occur in its extracted fragment.
//!
//! All comparators work on comment-stripped code and adhere to the `PatternComparator` trait,
//! so a `GradingJob` can swap matching strategies without touching extraction or scoring.
//!
//! The available comparators are:
//! - [`literal_comparator`]: Case-insensitive substring search, optionally ignoring a leading `$`.
//! - [`regex_comparator`]: Case-insensitive regular expression search.
//! - [`keyword_comparator`]: Dispatches each rubric pattern to one of the two above.

pub mod keyword_comparator;
pub mod literal_comparator;
pub mod regex_comparator;
