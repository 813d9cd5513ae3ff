//! # Scorer Module
//!
//! This module turns an extracted [`Fragment`] into a [`GradeResult`] and sums unit results
//! into a capped subtotal.
//!
//! Scoring is a keyword-presence heuristic: a unit passes when at least
//! `ceil(patterns * threshold)` of its patterns occur in the comment-stripped fragment and the
//! raw fragment carries no pending marker. It does not execute or parse the student's code, so
//! it can be fooled both ways (a keyword inside a string literal counts, a correct solution
//! using an alias does not).

use crate::traits::comparator::PatternComparator;
use crate::types::{Fragment, GradeResult, UnitStatus};
use regex::Regex;
use util::rubric::GradableUnit;

// Absorbs float noise such as 5 * 0.6 = 3.0000000000000004.
const EPSILON: f64 = 1e-9;

/// Number of patterns that must be found for a unit with `expected` patterns.
///
/// # Example
///
/// ```
/// use marker::scorer::required_matches;
///
/// assert_eq!(required_matches(3, 0.5), 2);
/// assert_eq!(required_matches(5, 0.6), 3);
/// assert_eq!(required_matches(1, 0.6), 1);
/// assert_eq!(required_matches(0, 0.6), 0);
/// ```
pub fn required_matches(expected: usize, threshold: f64) -> usize {
    let raw = expected as f64 * threshold.clamp(0.0, 1.0);
    ((raw - EPSILON).ceil().max(0.0)) as usize
}

/// Whether `raw` contains a comment whose first word is `marker` (e.g. `// TODO`).
pub fn is_pending(raw: &str, marker: &str) -> bool {
    if marker.trim().is_empty() {
        return false;
    }
    let pattern = format!(r"(?://|/\*)[ \t]*{}\b", regex::escape(marker.trim()));
    Regex::new(&pattern)
        .map(|re| re.is_match(raw))
        .unwrap_or(false)
}

/// Grade one unit against its fragment.
///
/// Missing and placeholder fragments award nothing and list every pattern as missed.
/// Code fragments are compared with `comparator`; the unit earns its full points only
/// when enough patterns match and no pending marker is present.
pub fn score_unit(
    unit: &GradableUnit,
    threshold: f64,
    fragment: &Fragment,
    pending_marker: Option<&str>,
    comparator: &dyn PatternComparator,
) -> GradeResult {
    let required = required_matches(unit.patterns.len(), threshold);
    let all_missed = || -> Vec<String> { unit.patterns.iter().map(ToString::to_string).collect() };

    let (status, matched_patterns, missed_patterns) = match fragment {
        Fragment::Missing => (UnitStatus::Missing, Vec::new(), all_missed()),
        Fragment::Placeholder => (UnitStatus::Placeholder, Vec::new(), all_missed()),
        Fragment::Code { raw, code } => {
            let outcome = comparator.compare(&unit.patterns, code);
            let status = if pending_marker.is_some_and(|m| is_pending(raw, m)) {
                UnitStatus::Pending
            } else if outcome.found() >= required {
                UnitStatus::Implemented
            } else {
                UnitStatus::Incomplete
            };
            (status, outcome.matched, outcome.missed)
        }
    };

    let awarded = if status == UnitStatus::Implemented {
        unit.points
    } else {
        0.0
    };

    GradeResult {
        id: unit.id.clone(),
        label: unit.label.clone(),
        status,
        matched_patterns,
        missed_patterns,
        required,
        awarded,
        counted: unit.counted,
    }
}

/// Sum of awarded points over counted units, capped at `max_score` and rounded to one decimal.
pub fn subtotal(results: &[GradeResult], max_score: f64) -> f64 {
    let sum: f64 = results
        .iter()
        .filter(|r| r.counted)
        .map(|r| r.awarded)
        .sum();
    round1(sum.min(max_score).max(0.0))
}

/// Counted units that reached `Implemented`.
pub fn completed_count(results: &[GradeResult]) -> usize {
    results.iter().filter(|r| r.counted && r.completed()).count()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
