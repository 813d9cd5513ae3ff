use crate::types::PatternMatch;
use util::rubric::Pattern;

/// PatternComparator is a strategy trait for checking a fragment against the
/// required patterns of a unit.
pub trait PatternComparator {
    /// Compare the comment-stripped `code` of a fragment against `patterns`.
    ///
    /// Matched and missed patterns are returned in the order given.
    fn compare(&self, patterns: &[Pattern], code: &str) -> PatternMatch;
}
