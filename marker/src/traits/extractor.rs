use crate::types::Fragment;

/// Locates the fragment of a source text that belongs to one gradable unit.
///
/// Implementations scan flat and in order: the first occurrence of their marker
/// wins, and the fragment ends at the next marker of the same class.
pub trait FragmentExtractor {
    fn extract(&self, source: &str) -> Fragment;
}
