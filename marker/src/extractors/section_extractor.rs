//! Comment-heading extraction.
//!
//! A section starts at a whole comment line such as `// Exercice 7 : Comptage`
//! (case-insensitive, a colon is required after the number). It ends at the first of:
//!
//! - the next heading of the same class (`// Exercice <digits> :`);
//! - a phase banner (`// ####...`, ten or more `#`);
//! - a rule line (`// ====...`, ten or more `=`) once the section has code above it;
//! - end of text.
//!
//! Requiring the colon keeps table-of-contents lines (`// - Exercice 1 → ...`) and
//! checklist lines (`// [ ] Exercice 1 : ...`) from matching, and the trailing colon
//! keeps `Exercice 1` from matching `Exercice 10`. Rule lines before any code are the
//! frame around the exercise statement and are skipped.

use super::comments::{PLACEHOLDER_FLOOR, classify, meaningful_chars, strip_comments};
use crate::error::MarkerError;
use crate::traits::extractor::FragmentExtractor;
use crate::types::Fragment;
use once_cell::sync::Lazy;
use regex::Regex;

static PHASE_BANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*//[ \t]*#{10,}[ \t\r]*$").expect("banner regex is valid")
});
static RULE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*//[ \t]*={10,}[ \t\r]*$").expect("rule regex is valid")
});

#[derive(Debug, Clone)]
pub struct SectionExtractor {
    heading: Regex,
    boundary: Regex,
}

impl SectionExtractor {
    pub fn new(heading: &str) -> Result<Self, MarkerError> {
        let words: Vec<String> = heading.split_whitespace().map(regex::escape).collect();
        let Some(class) = words.first() else {
            return Err(MarkerError::InvalidPattern(
                "section heading is empty".to_string(),
            ));
        };

        let heading = Regex::new(&format!(
            r"(?im)^[ \t]*//[ \t]*{}[ \t]*:[^\n]*",
            words.join(r"[ \t]*")
        ))
        .map_err(|e| MarkerError::InvalidPattern(e.to_string()))?;
        let boundary = Regex::new(&format!(r"(?im)^[ \t]*//[ \t]*{class}[ \t]*\d+[ \t]*:"))
            .map_err(|e| MarkerError::InvalidPattern(e.to_string()))?;

        Ok(Self { heading, boundary })
    }

    /// Byte offset in `rest` where the section that precedes it ends.
    fn section_end(&self, rest: &str) -> usize {
        let mut end = self.boundary.find(rest).map_or(rest.len(), |m| m.start());
        if let Some(banner) = PHASE_BANNER.find(&rest[..end]) {
            end = banner.start();
        }
        let closing_rule = RULE_LINE.find_iter(&rest[..end]).find(|rule| {
            meaningful_chars(&strip_comments(&rest[..rule.start()])) >= PLACEHOLDER_FLOOR
        });
        if let Some(rule) = closing_rule {
            end = rule.start();
        }
        end
    }
}

impl FragmentExtractor for SectionExtractor {
    fn extract(&self, source: &str) -> Fragment {
        let Some(found) = self.heading.find(source) else {
            return Fragment::Missing;
        };
        let rest = &source[found.end()..];
        classify(&rest[..self.section_end(rest)])
    }
}
