//! File name patterns for the fallback search

use crate::error::ResolveError;
use globset::{GlobBuilder, GlobMatcher};
use std::fmt;
use std::path::Path;

/// Default fallback pattern used by every historical image recipe
pub const DEFAULT_SEARCH_PATTERN: &str = "*server*.py";

/// A compiled glob matched against file names only
#[derive(Debug, Clone)]
pub struct SearchPattern {
    raw: String,
    matcher: GlobMatcher,
}

impl SearchPattern {
    pub fn new(pattern: &str) -> Result<Self, ResolveError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ResolveError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();
        Ok(Self {
            raw: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match the final component of `path` against the pattern
    pub fn matches_file_name(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
