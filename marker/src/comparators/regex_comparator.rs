//! Regular expression matching for rubric patterns such as `grade.*score`.

use crate::error::MarkerError;
use regex::Regex;

/// Case-insensitive regex matcher.
///
/// Patterns are compiled with the `(?i)` flag. An invalid pattern is reported as
/// [`MarkerError::InvalidPattern`] and the caller decides how to score it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexComparator;

impl RegexComparator {
    pub fn compile(&self, pattern: &str) -> Result<Regex, MarkerError> {
        Regex::new(&format!("(?i){pattern}"))
            .map_err(|e| MarkerError::InvalidPattern(format!("{pattern}: {e}")))
    }

    pub fn matches(&self, pattern: &str, code: &str) -> Result<bool, MarkerError> {
        Ok(self.compile(pattern)?.is_match(code))
    }
}
