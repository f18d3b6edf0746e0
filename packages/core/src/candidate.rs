//! Priority-ordered candidate locations for the entrypoint script
//!
//! Candidates are fixed when the image is built. Their rank is the order in
//! which they were declared; rank 0 is probed first.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A declared entrypoint location with its probe rank
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CandidatePath {
    pub rank: usize,
    pub path: PathBuf,
}

impl CandidatePath {
    /// Whether the candidate exists as a regular file (symlinks are followed)
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Candidates in ascending rank order
///
/// Built from an ordered sequence of paths, so ranks are dense and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<CandidatePath>,
}

impl CandidateList {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let candidates = paths
            .into_iter()
            .enumerate()
            .map(|(rank, path)| CandidatePath {
                rank,
                path: path.into(),
            })
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidatePath> {
        self.candidates.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.candidates.iter().map(|c| c.path.as_path())
    }

    /// Return the lowest-ranked candidate that exists.
    ///
    /// Stops at the first hit; candidates after it are never touched.
    pub fn first_existing(&self) -> Option<&CandidatePath> {
        for candidate in &self.candidates {
            if candidate.exists() {
                debug!(rank = candidate.rank, path = %candidate.path.display(), "candidate found");
                return Some(candidate);
            }
            debug!(rank = candidate.rank, path = %candidate.path.display(), "candidate missing");
        }
        None
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a CandidatePath;
    type IntoIter = std::slice::Iter<'a, CandidatePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
