use crate::types::Fragment;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fragments with fewer non-whitespace characters than this, once comments are
/// stripped, are placeholders.
pub const PLACEHOLDER_FLOOR: usize = 5;

// Leftmost match wins, so `//` inside a block comment and `/*` inside a line
// comment are both handled.
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment regex is valid"));

/// Remove `// ...` and `/* ... */` comments.
pub fn strip_comments(text: &str) -> String {
    COMMENT.replace_all(text, "").into_owned()
}

pub fn meaningful_chars(code: &str) -> usize {
    code.chars().filter(|c| !c.is_whitespace()).count()
}

/// Turn found text into a [`Fragment`], demoting comment-only or near-empty
/// text to [`Fragment::Placeholder`].
pub fn classify(raw: &str) -> Fragment {
    let code = strip_comments(raw);
    if meaningful_chars(&code) < PLACEHOLDER_FLOOR {
        Fragment::Placeholder
    } else {
        Fragment::Code {
            raw: raw.to_string(),
            code,
        }
    }
}
