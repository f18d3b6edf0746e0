//! resolve-entrypoint - container startup entrypoint resolver
//!
//! This module contains the CLI implementation used by the binary: argument
//! parsing, config layering, logging setup and command dispatch.

mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use entrypoint_core::config::validation::{display_validation_error, display_validation_warning};
use entrypoint_core::{
    AmbiguityPolicy, BuildVariant, Config, ConfigError, apply_env_overrides, get_version,
    load_config_or_default, validate_config,
};
use std::path::PathBuf;
use tracing::debug;

/// Find the server script for this container and exec it
#[derive(Parser, Debug)]
#[command(name = "resolve-entrypoint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Find the server script for this container and exec it",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Launcher config file (JSONC); defaults to $ENTRYPOINT_CONFIG
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pin the entrypoint script; skips candidates and search
    #[arg(long, global = true, value_name = "PATH")]
    entrypoint: Option<PathBuf>,

    /// Build variant whose candidate layout is probed
    #[arg(long, global = true, value_name = "http|grpc")]
    variant: Option<BuildVariant>,

    /// Candidate path, in probe order (repeatable; replaces the variant list)
    #[arg(long = "candidate", global = true, value_name = "PATH")]
    candidates: Vec<PathBuf>,

    /// Root directory of the fallback search
    #[arg(long, global = true, value_name = "DIR")]
    search_root: Option<PathBuf>,

    /// File name glob for the fallback search
    #[arg(long, global = true, value_name = "GLOB")]
    pattern: Option<String>,

    /// Program that runs the script
    #[arg(long, global = true, conflicts_with = "no_interpreter")]
    interpreter: Option<String>,

    /// Exec the script directly instead of through an interpreter
    #[arg(long, global = true)]
    no_interpreter: bool,

    /// What to do when the fallback search matches several files
    #[arg(long, global = true, value_name = "reject|first")]
    on_ambiguous: Option<AmbiguityPolicy>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the entrypoint and exec it (default)
    Run(commands::RunArgs),
    /// Resolve the entrypoint and report the decision without launching
    Check(commands::CheckArgs),
    /// List build variants and their candidate layouts
    Variants(commands::VariantsArgs),
}

/// Layer command-line overrides on top of file and environment config
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(entrypoint) = &cli.entrypoint {
        config.entrypoint = Some(entrypoint.clone());
    }
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    if !cli.candidates.is_empty() {
        config.candidates = Some(cli.candidates.clone());
    }
    if let Some(root) = &cli.search_root {
        config.search_root = root.clone();
    }
    if let Some(pattern) = &cli.pattern {
        config.search_pattern = pattern.clone();
    }
    if let Some(interpreter) = &cli.interpreter {
        config.interpreter = Some(interpreter.clone());
    }
    if cli.no_interpreter {
        config.interpreter = None;
    }
    if let Some(policy) = cli.on_ambiguous {
        config.on_ambiguous = policy;
    }
}

/// Build the effective config: defaults, file, environment, flags
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = load_config_or_default(cli.config.as_deref())?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut config, cli);
    Ok(config)
}

/// Parse arguments, resolve, and dispatch. Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    logging::init_tracing(cli.verbose, cli.quiet);
    debug!(version = get_version(), "resolve-entrypoint starting");

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::show_config_error(&e);
            return Ok(e.exit_code());
        }
    };

    match validate_config(&config) {
        Ok(warnings) => {
            if !cli.quiet {
                for warning in &warnings {
                    display_validation_warning(warning);
                }
            }
        }
        Err(e) => {
            display_validation_error(&e);
            return Ok(ConfigError::from(e).exit_code());
        }
    }

    if cli.verbose > 0 {
        eprintln!(
            "{} variant={} search_root={} pattern={}",
            style("[info]").cyan(),
            config.variant,
            config.search_root.display(),
            config.search_pattern
        );
    }

    match cli.command {
        Some(Commands::Run(ref args)) => commands::cmd_run(args, &config),
        Some(Commands::Check(ref args)) => commands::cmd_check(args, &config, cli.quiet),
        Some(Commands::Variants(ref args)) => {
            commands::cmd_variants(args, config.variant);
            Ok(0)
        }
        None => commands::cmd_run(&commands::RunArgs::default(), &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("resolve-entrypoint").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_command_defaults_to_run() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_passes_trailing_args_through() {
        let cli = parse(&["run", "grpc", "0.0.0.0", "--port-hint"]);
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.args.len(), 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_overrides_win_over_config() {
        let cli = parse(&[
            "--variant",
            "grpc",
            "--candidate",
            "/srv/a.py",
            "--candidate",
            "/srv/b.py",
            "--search-root",
            "/srv",
            "--pattern",
            "main*.py",
            "--on-ambiguous",
            "first",
            "check",
        ]);
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.variant, BuildVariant::Grpc);
        assert_eq!(
            config.candidates,
            Some(vec![PathBuf::from("/srv/a.py"), PathBuf::from("/srv/b.py")])
        );
        assert_eq!(config.search_root, PathBuf::from("/srv"));
        assert_eq!(config.search_pattern, "main*.py");
        assert_eq!(config.on_ambiguous, AmbiguityPolicy::First);
        assert_eq!(config.interpreter.as_deref(), Some("python3"));
    }

    #[test]
    fn no_interpreter_clears_default() {
        let cli = parse(&["--no-interpreter", "check"]);
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.interpreter, None);
    }

    #[test]
    fn interpreter_conflicts_with_no_interpreter() {
        let result = Cli::try_parse_from([
            "resolve-entrypoint",
            "--interpreter",
            "python",
            "--no-interpreter",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_variant_is_an_argument_error() {
        let result = Cli::try_parse_from(["resolve-entrypoint", "--variant", "soap"]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
