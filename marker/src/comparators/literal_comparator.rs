//! Literal keyword matching.
//!
//! Matching is a case-insensitive substring search. When the sigil is optional, a
//! single leading `$` is dropped from the pattern before searching, so `$group`
//! also accepts `group`.

/// Case-insensitive substring matcher for literal patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralComparator {
    pub sigil_optional: bool,
}

impl LiteralComparator {
    pub fn new(sigil_optional: bool) -> Self {
        Self { sigil_optional }
    }

    /// Whether `pattern` occurs in `code_lower`, which must already be lowercased.
    pub fn matches(&self, pattern: &str, code_lower: &str) -> bool {
        let needle = if self.sigil_optional {
            pattern.strip_prefix('$').unwrap_or(pattern)
        } else {
            pattern
        };
        code_lower.contains(&needle.to_lowercase())
    }
}
