//! entrypoint-core - resolution logic for the container entrypoint launcher
//!
//! At container start the launcher must pick exactly one server script among
//! the layouts the image has been packaged with over time, or fail loudly.
//! This crate holds that decision and everything it depends on:
//! - candidate probing in declared order
//! - the recursive fallback search and its operator diagnostics
//! - the launch plan that hands the process over to the server
//! - configuration schema, loading and validation

pub mod candidate;
pub mod config;
mod error;
pub mod launch;
pub mod pattern;
pub mod resolver;
pub mod search;
pub mod variant;

pub use candidate::{CandidateList, CandidatePath};
pub use config::{Config, apply_env_overrides, load_config_or_default, validate_config};
pub use error::{ConfigError, ResolveError};
pub use launch::{LaunchPlan, PORT_ENV, PortSource, effective_port};
pub use pattern::SearchPattern;
pub use resolver::{AmbiguityPolicy, Resolution, ResolutionResult, ResolutionSource, Resolver};
pub use search::{find_matches, list_python_files};
pub use variant::BuildVariant;

/// Package version, shared by every binary built from this workspace
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
