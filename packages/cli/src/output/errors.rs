//! Centralized resolution error formatting
//!
//! This module provides consistent, actionable error messages for entrypoint
//! failures across all CLI commands.

use console::style;
use entrypoint_core::config::ENTRYPOINT_SCRIPT_ENV;
use entrypoint_core::{ConfigError, ResolveError};

/// Format resolution errors with actionable guidance
///
/// Returns a styled, multi-line error message with troubleshooting steps.
pub fn format_resolve_error(e: &ResolveError) -> String {
    match e {
        ResolveError::MissingEntrypoint { root, pattern } => {
            format!(
                "{}\n\n  {}\n  {}\n  {}\n\n  {}",
                style("No server entrypoint found").red().bold(),
                format_args!(
                    "None of the candidate paths exist and no file under {} matches '{}'.",
                    root.display(),
                    pattern
                ),
                "The image was most likely built with a layout this launcher does not know.",
                style(format!("  Pin it: {ENTRYPOINT_SCRIPT_ENV}=/app/<path>/run_server.py")).cyan(),
                style("This is a build problem; restarting the container will not help.").dim()
            )
        }
        ResolveError::AmbiguousMatch {
            root,
            pattern,
            matches,
        } => {
            let mut msg = format!(
                "{}\n\n  {}\n",
                style("Ambiguous server entrypoint").red().bold(),
                format_args!(
                    "{} files under {} match '{}':",
                    matches.len(),
                    root.display(),
                    pattern
                )
            );
            for path in matches {
                msg.push_str(&format!("    {}\n", style(path.display()).yellow()));
            }
            msg.push_str(&format!(
                "\n  {}\n  {}\n  {}",
                "Refusing to guess. Choose one explicitly:",
                style(format!("  {ENTRYPOINT_SCRIPT_ENV}=<one of the paths above>")).cyan(),
                style("  or: --on-ambiguous first (takes the first listed)").cyan()
            ));
            msg
        }
        ResolveError::ExplicitEntrypointMissing(path) => {
            format!(
                "{}\n\n  {}\n  {}",
                style("Configured entrypoint is missing").red().bold(),
                format_args!("{} does not exist or is not a regular file.", path.display()),
                style(format!(
                    "  Check the image contents or unset {ENTRYPOINT_SCRIPT_ENV} to use discovery."
                ))
                .cyan()
            )
        }
        ResolveError::Launch { program, source } => {
            format!(
                "{}\n\n  {}\n  {}",
                style("Failed to start the server").red().bold(),
                format_args!("{}: {}", program.display(), source),
                style("  Check that the interpreter is installed and on PATH (--interpreter).")
                    .cyan()
            )
        }
        _ => e.to_string(),
    }
}

/// Show a resolution error in a rich format to stderr
///
/// Prints a blank line before the error message for visual separation.
pub fn show_resolve_error(e: &ResolveError) {
    let msg = format_resolve_error(e);
    eprintln!();
    eprintln!("{msg}");
}

/// Show a configuration error to stderr
pub fn show_config_error(e: &ConfigError) {
    eprintln!("{} Configuration error", style("Error:").red().bold());
    eprintln!();
    eprintln!("  {e}");
    eprintln!();
    eprintln!(
        "  {} Config files are JSONC; unknown fields are rejected.",
        style("Tip:").cyan()
    );
}
