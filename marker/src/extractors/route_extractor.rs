//! Route-declaration extraction.
//!
//! A route fragment starts right after `<method>('<path>'` and ends at the next
//! `<method>` occurrence or end of text. When the locator names a binding, the
//! fragment is narrowed to the body of the first `const <binding> = [ ... ];`
//! array inside the route. A route without that array is a placeholder.

use super::comments::classify;
use crate::error::MarkerError;
use crate::traits::extractor::FragmentExtractor;
use crate::types::Fragment;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct RouteExtractor {
    method: String,
    marker: Regex,
    binding: Option<Regex>,
}

impl RouteExtractor {
    pub fn new(method: &str, path: &str, binding: Option<&str>) -> Result<Self, MarkerError> {
        if method.trim().is_empty() {
            return Err(MarkerError::InvalidPattern(format!(
                "route '{path}' has an empty method"
            )));
        }
        let marker = Regex::new(&format!(
            r#"{}\s*\(\s*['"`]{}['"`]"#,
            regex::escape(method),
            regex::escape(path)
        ))
        .map_err(|e| MarkerError::InvalidPattern(e.to_string()))?;

        let binding = binding
            .map(|name| {
                Regex::new(&format!(
                    r"(?s)const\s+{}\s*=\s*\[(.*?)\];",
                    regex::escape(name)
                ))
                .map_err(|e| MarkerError::InvalidPattern(e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            method: method.to_string(),
            marker,
            binding,
        })
    }
}

impl FragmentExtractor for RouteExtractor {
    fn extract(&self, source: &str) -> Fragment {
        let Some(found) = self.marker.find(source) else {
            return Fragment::Missing;
        };
        let rest = &source[found.end()..];
        let route = match rest.find(&self.method) {
            Some(next) => &rest[..next],
            None => rest,
        };

        match &self.binding {
            None => classify(route),
            Some(binding) => match binding.captures(route).and_then(|c| c.get(1)) {
                Some(body) => classify(body.as_str()),
                None => Fragment::Placeholder,
            },
        }
    }
}
