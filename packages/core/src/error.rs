//! Error types for entrypoint resolution and configuration loading
//!
//! Every variant here is fatal for the process: the resolver makes a single
//! attempt per container start and never retries.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a runnable entrypoint
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No candidate exists and the fallback search matched nothing
    #[error("no entrypoint found: no candidate exists and no file under {} matches '{pattern}'", .root.display())]
    MissingEntrypoint { root: PathBuf, pattern: String },

    /// The fallback search matched more than one file and ambiguity is rejected
    #[error("ambiguous entrypoint: {} files under {} match '{pattern}'", .matches.len(), .root.display())]
    AmbiguousMatch {
        root: PathBuf,
        pattern: String,
        matches: Vec<PathBuf>,
    },

    /// An explicit entrypoint was configured but is not a regular file
    #[error("configured entrypoint {} does not exist or is not a regular file", .0.display())]
    ExplicitEntrypointMissing(PathBuf),

    /// The search pattern is not a valid glob
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Replacing the process image (or spawning the child) failed
    #[error("failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load or validate launcher configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid config field '{field}': {message}")]
    Invalid { field: String, message: String },

    #[error("unknown build variant '{0}' (expected 'http' or 'grpc')")]
    UnknownVariant(String),

    #[error("unknown ambiguity policy '{0}' (expected 'reject' or 'first')")]
    UnknownPolicy(String),
}

impl ResolveError {
    /// Process exit code reported for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl ConfigError {
    /// Process exit code reported for this failure (EX_CONFIG)
    pub fn exit_code(&self) -> i32 {
        78
    }
}
