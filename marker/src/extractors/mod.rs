//! # Extractors
//!
//! Fragment extractors locate the part of a source file that belongs to one gradable unit.
//! Every extractor performs a flat, order-dependent scan: the first occurrence of the unit's
//! marker wins and the fragment runs to the next marker of the same class (or end of text).
//! Nested sections are not recognised.
//!
//! The available extractors are:
//! - [`route_extractor`]: route declarations such as `fastify.get('/api/stats/overview', ...)`.
//! - [`section_extractor`]: comment headings such as `// Exercice 7 : ...`.
//! - [`comments`]: comment stripping and placeholder detection shared by both.

pub mod comments;
pub mod route_extractor;
pub mod section_extractor;

use crate::error::MarkerError;
use crate::traits::extractor::FragmentExtractor;
use route_extractor::RouteExtractor;
use section_extractor::SectionExtractor;
use util::rubric::Locator;

/// Build the extractor described by a rubric locator.
pub fn for_locator(locator: &Locator) -> Result<Box<dyn FragmentExtractor>, MarkerError> {
    match locator {
        Locator::Route {
            method,
            path,
            binding,
        } => Ok(Box::new(RouteExtractor::new(
            method,
            path,
            binding.as_deref(),
        )?)),
        Locator::Section { heading } => Ok(Box::new(SectionExtractor::new(heading)?)),
    }
}
