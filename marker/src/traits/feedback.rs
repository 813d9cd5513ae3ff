//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait, used to implement pluggable feedback strategies
//! over a merged [`GradeReport`].
//!

use crate::merge::StageStatus;
use crate::report::GradeReport;
use std::collections::BTreeMap;

/// Everything a feedback strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackContext<'a> {
    pub report: &'a GradeReport,
    /// How each stage report was obtained (loaded, missing, malformed, errored).
    pub stages: &'a BTreeMap<crate::merge::Stage, StageStatus>,
}

/// A trait for pluggable feedback strategies in the marker system.
///
/// Strategies return an ordered list of messages. Every message is independent: a
/// strategy must not stop at the first condition that holds.
pub trait Feedback {
    fn assemble_feedback(&self, ctx: FeedbackContext<'_>) -> Vec<String>;
}
