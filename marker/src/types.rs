//! # Types Module
//!
//! Core data structures shared by the extractors, comparators and the scorer.

use serde::{Deserialize, Serialize};

/// The part of a source file associated with one gradable unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// The unit's locator does not occur in the source.
    Missing,
    /// The locator was found but there is no real content behind it.
    Placeholder,
    /// Real content: the raw text and the same text with comments stripped.
    Code { raw: String, code: String },
}

impl Fragment {
    pub fn is_code(&self) -> bool {
        matches!(self, Fragment::Code { .. })
    }
}

/// Which of a unit's required patterns were found in its fragment, in rubric order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMatch {
    pub matched: Vec<String>,
    pub missed: Vec<String>,
}

impl PatternMatch {
    pub fn found(&self) -> usize {
        self.matched.len()
    }

    pub fn expected(&self) -> usize {
        self.matched.len() + self.missed.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// Locator not found.
    Missing,
    /// Found, but empty or comment-only.
    Placeholder,
    /// Contains the not-yet-done marker.
    Pending,
    /// Too few patterns found.
    Incomplete,
    Implemented,
}

/// Outcome of grading a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    pub id: String,
    pub label: String,
    pub status: UnitStatus,
    pub matched_patterns: Vec<String>,
    pub missed_patterns: Vec<String>,
    /// Matches needed to pass the unit's threshold.
    pub required: usize,
    /// Points awarded, either 0 or the unit's full value.
    pub awarded: f64,
    pub counted: bool,
}

impl GradeResult {
    pub fn completed(&self) -> bool {
        self.status == UnitStatus::Implemented
    }

    pub fn found(&self) -> usize {
        self.matched_patterns.len()
    }

    pub fn expected(&self) -> usize {
        self.matched_patterns.len() + self.missed_patterns.len()
    }
}
