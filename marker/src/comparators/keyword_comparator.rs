//! The default comparator: literal patterns by substring, regex patterns by regex.

use super::literal_comparator::LiteralComparator;
use super::regex_comparator::RegexComparator;
use crate::traits::comparator::PatternComparator;
use crate::types::PatternMatch;
use tracing::warn;
use util::rubric::Pattern;

/// Checks every rubric pattern against a fragment and reports matched and missed
/// patterns in rubric order.
///
/// An invalid regex pattern never aborts grading. It is logged and counted as missed.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordComparator {
    literal: LiteralComparator,
    regex: RegexComparator,
}

impl KeywordComparator {
    pub fn new(sigil_optional: bool) -> Self {
        Self {
            literal: LiteralComparator::new(sigil_optional),
            regex: RegexComparator,
        }
    }
}

impl PatternComparator for KeywordComparator {
    fn compare(&self, patterns: &[Pattern], code: &str) -> PatternMatch {
        let code_lower = code.to_lowercase();
        let mut result = PatternMatch::default();

        for pattern in patterns {
            let found = match pattern {
                Pattern::Literal(text) => self.literal.matches(text, &code_lower),
                Pattern::Regex { regex } => match self.regex.matches(regex, code) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!("{e}; counting pattern as missed");
                        false
                    }
                },
            };
            if found {
                result.matched.push(pattern.to_string());
            } else {
                result.missed.push(pattern.to_string());
            }
        }

        result
    }
}
