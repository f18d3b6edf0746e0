//! Entrypoint resolution
//!
//! Decides which script becomes the container's server process. The decision
//! order is fixed:
//! 1. an explicitly configured entrypoint, when present (no probing, no search)
//! 2. the lowest-ranked candidate that exists as a regular file
//! 3. the fallback search under the search root
//!
//! A resolver instance makes one attempt; callers never retry.

use crate::candidate::CandidateList;
use crate::error::{ConfigError, ResolveError};
use crate::pattern::SearchPattern;
use crate::search::find_matches;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// What to do when the fallback search matches more than one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Fail and list every match
    #[default]
    Reject,
    /// Take the first match in sorted traversal order
    First,
}

impl AmbiguityPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            AmbiguityPolicy::Reject => "reject",
            AmbiguityPolicy::First => "first",
        }
    }
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AmbiguityPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(AmbiguityPolicy::Reject),
            "first" => Ok(AmbiguityPolicy::First),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// How the selected script was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionSource {
    Explicit,
    Candidate { rank: usize },
    Search { matches: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: PathBuf,
    pub source: ResolutionSource,
}

/// Outcome of a single resolution attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionResult {
    Found(Resolution),
    NotFound,
}

impl ResolutionResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolutionResult::Found(resolution) => Some(&resolution.path),
            ResolutionResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found(_))
    }
}

/// Resolver inputs, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct Resolver {
    explicit: Option<PathBuf>,
    candidates: CandidateList,
    pattern: SearchPattern,
    search_root: PathBuf,
    policy: AmbiguityPolicy,
}

impl Resolver {
    pub fn new(candidates: CandidateList, pattern: SearchPattern, search_root: PathBuf) -> Self {
        Self {
            explicit: None,
            candidates,
            pattern,
            search_root,
            policy: AmbiguityPolicy::default(),
        }
    }

    /// Pin the entrypoint; disables candidate probing and the fallback search
    pub fn with_explicit(mut self, entrypoint: Option<PathBuf>) -> Self {
        self.explicit = entrypoint;
        self
    }

    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    pub fn pattern(&self) -> &SearchPattern {
        &self.pattern
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Run the decision sequence once.
    ///
    /// `Ok(NotFound)` means nothing matched; errors are reserved for a missing
    /// explicit entrypoint and a rejected ambiguous search.
    pub fn resolve(&self) -> Result<ResolutionResult, ResolveError> {
        if let Some(explicit) = &self.explicit {
            if !explicit.is_file() {
                return Err(ResolveError::ExplicitEntrypointMissing(explicit.clone()));
            }
            info!(path = %explicit.display(), "using configured entrypoint");
            return Ok(ResolutionResult::Found(Resolution {
                path: explicit.clone(),
                source: ResolutionSource::Explicit,
            }));
        }

        if let Some(candidate) = self.candidates.first_existing() {
            info!(
                rank = candidate.rank,
                path = %candidate.path.display(),
                "resolved entrypoint from candidate list"
            );
            return Ok(ResolutionResult::Found(Resolution {
                path: candidate.path.clone(),
                source: ResolutionSource::Candidate {
                    rank: candidate.rank,
                },
            }));
        }

        info!(
            root = %self.search_root.display(),
            pattern = %self.pattern,
            "no candidate exists; searching"
        );
        let mut matches = find_matches(&self.search_root, &self.pattern);
        let count = matches.len();
        match count {
            0 => Ok(ResolutionResult::NotFound),
            1 => Ok(ResolutionResult::Found(Resolution {
                path: matches.remove(0),
                source: ResolutionSource::Search { matches: 1 },
            })),
            _ => match self.policy {
                AmbiguityPolicy::Reject => Err(ResolveError::AmbiguousMatch {
                    root: self.search_root.clone(),
                    pattern: self.pattern.to_string(),
                    matches,
                }),
                AmbiguityPolicy::First => {
                    let path = matches.remove(0);
                    warn!(
                        selected = %path.display(),
                        ignored = ?matches,
                        "fallback search matched {count} files; taking the first"
                    );
                    Ok(ResolutionResult::Found(Resolution {
                        path,
                        source: ResolutionSource::Search { matches: count },
                    }))
                }
            },
        }
    }

    /// Like [`Resolver::resolve`], but treats `NotFound` as `MissingEntrypoint`
    pub fn require(&self) -> Result<Resolution, ResolveError> {
        match self.resolve()? {
            ResolutionResult::Found(resolution) => Ok(resolution),
            ResolutionResult::NotFound => Err(ResolveError::MissingEntrypoint {
                root: self.search_root.clone(),
                pattern: self.pattern.to_string(),
            }),
        }
    }
}
