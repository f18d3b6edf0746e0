//! Run command implementation
//!
//! Resolves the server script and replaces this process with it. This is the
//! default command and what the image's ENTRYPOINT invokes.

use crate::output::{print_not_found_report, show_resolve_error};
use anyhow::Result;
use clap::Args;
use entrypoint_core::{
    Config, LaunchPlan, PORT_ENV, ResolutionSource, ResolveError, effective_port,
};
use std::ffi::OsString;
use tracing::{info, warn};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Arguments passed through to the server script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Resolve and launch the server
///
/// This command:
/// 1. Runs the resolver once (explicit entrypoint, candidates, fallback search)
/// 2. On success, execs the server; this call does not return on Unix
/// 3. On failure, prints the error and the diagnostic listing, returns exit code 1
pub fn cmd_run(args: &RunArgs, config: &Config) -> Result<i32> {
    let resolver = config.build_resolver()?;

    let resolution = match resolver.require() {
        Ok(resolution) => resolution,
        Err(err) => {
            show_resolve_error(&err);
            if matches!(err, ResolveError::MissingEntrypoint { .. }) {
                let (port, source) =
                    effective_port(std::env::var(PORT_ENV).ok(), config.default_port);
                print_not_found_report(
                    resolver.candidates(),
                    resolver.search_root(),
                    config.diagnostic_limit,
                    (&port, source),
                );
            }
            return Ok(err.exit_code());
        }
    };

    if matches!(resolution.source, ResolutionSource::Search { .. }) {
        warn!(
            path = %resolution.path.display(),
            "entrypoint found by fallback search; pin it with ENTRYPOINT_SCRIPT"
        );
    }

    let plan = LaunchPlan::from_env(
        resolution.path,
        config.interpreter.clone(),
        args.args.clone(),
        config.default_port,
    );
    info!(
        variant = %config.variant,
        exposed_port = config.variant.exposed_port(),
        port = plan.port(),
        "launching server"
    );

    match plan.launch() {
        Ok(code) => Ok(code),
        Err(err) => {
            show_resolve_error(&err);
            Ok(err.exit_code())
        }
    }
}
