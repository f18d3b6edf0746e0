//! Configuration schema for the entrypoint resolver
//!
//! Defines the structure and defaults for the optional launcher config file
//! (JSONC, comments allowed).

use crate::candidate::CandidateList;
use crate::error::ResolveError;
use crate::pattern::{DEFAULT_SEARCH_PATTERN, SearchPattern};
use crate::resolver::{AmbiguityPolicy, Resolver};
use crate::search::{DEFAULT_DIAGNOSTIC_LIMIT, DEFAULT_SEARCH_ROOT};
use crate::variant::{BuildVariant, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Launcher configuration
///
/// Every field except `version` is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version for migrations
    pub version: u32,

    /// Build variant whose candidate layout is probed (default: "http")
    #[serde(default)]
    pub variant: BuildVariant,

    /// Pinned entrypoint script. When set, candidates and search are skipped.
    #[serde(default)]
    pub entrypoint: Option<PathBuf>,

    /// Candidate paths in probe order. Replaces the variant's list when set.
    #[serde(default)]
    pub candidates: Option<Vec<PathBuf>>,

    /// Root of the fallback search (default: "/app")
    #[serde(default = "default_search_root")]
    pub search_root: PathBuf,

    /// File name glob for the fallback search (default: "*server*.py")
    #[serde(default = "default_search_pattern")]
    pub search_pattern: String,

    /// Program that runs the script (default: "python3")
    /// Set to null to exec the script directly.
    #[serde(default = "default_interpreter")]
    pub interpreter: Option<String>,

    /// PORT handed to the server when the environment has none (default: 8080)
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Maximum number of `.py` files listed when nothing resolves (default: 10)
    #[serde(default = "default_diagnostic_limit")]
    pub diagnostic_limit: usize,

    /// Behavior when the fallback search matches several files (default: "reject")
    #[serde(default)]
    pub on_ambiguous: AmbiguityPolicy,
}

fn default_search_root() -> PathBuf {
    PathBuf::from(DEFAULT_SEARCH_ROOT)
}

fn default_search_pattern() -> String {
    DEFAULT_SEARCH_PATTERN.to_string()
}

fn default_interpreter() -> Option<String> {
    Some("python3".to_string())
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_diagnostic_limit() -> usize {
    DEFAULT_DIAGNOSTIC_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            variant: BuildVariant::default(),
            entrypoint: None,
            candidates: None,
            search_root: default_search_root(),
            search_pattern: default_search_pattern(),
            interpreter: default_interpreter(),
            default_port: default_port(),
            diagnostic_limit: default_diagnostic_limit(),
            on_ambiguous: AmbiguityPolicy::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates to probe: the explicit list, or the variant's layout
    pub fn candidate_list(&self) -> CandidateList {
        match &self.candidates {
            Some(paths) => CandidateList::new(paths.iter().cloned()),
            None => CandidateList::new(self.variant.candidates().iter().copied()),
        }
    }

    pub fn build_resolver(&self) -> Result<Resolver, ResolveError> {
        let pattern = SearchPattern::new(&self.search_pattern)?;
        Ok(
            Resolver::new(self.candidate_list(), pattern, self.search_root.clone())
                .with_explicit(self.entrypoint.clone())
                .with_policy(self.on_ambiguous),
        )
    }
}
