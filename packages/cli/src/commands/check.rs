//! Check command implementation
//!
//! Runs the resolver without launching anything and reports the decision.
//! Useful as an image build step or a smoke test.

use super::EXIT_UNRESOLVED;
use crate::output::{
    format_port, outcome_style, print_not_found_report, show_resolve_error, source_label,
};
use anyhow::Result;
use clap::Args;
use console::style;
use entrypoint_core::{
    Config, PORT_ENV, PortSource, ResolutionResult, ResolveError, effective_port,
    list_python_files,
};

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Print the decision as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

const CHECK_LABEL_WIDTH: usize = 12;

/// Resolve once and report; exit code 0 when a script resolves, 1 otherwise
pub fn cmd_check(args: &CheckArgs, config: &Config, quiet: bool) -> Result<i32> {
    let resolver = config.build_resolver()?;
    let (port, port_source) =
        effective_port(std::env::var(PORT_ENV).ok(), config.default_port);

    let result = match resolver.resolve() {
        Ok(result) => result,
        Err(err) => {
            if args.json {
                println!("{}", error_json(&err, config, &port)?);
            } else {
                show_resolve_error(&err);
            }
            return Ok(err.exit_code());
        }
    };

    if args.json {
        println!("{}", result_json(&result, config, &port)?);
    } else if !quiet {
        print_summary(&result, config, &port, port_source);
    }

    match result {
        ResolutionResult::Found(_) => Ok(0),
        ResolutionResult::NotFound => {
            if !args.json {
                print_not_found_report(
                    resolver.candidates(),
                    resolver.search_root(),
                    config.diagnostic_limit,
                    (&port, port_source),
                );
            }
            Ok(EXIT_UNRESOLVED)
        }
    }
}

fn display_paths(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

fn result_json(result: &ResolutionResult, config: &Config, port: &str) -> Result<String> {
    let mut value = serde_json::to_value(result)?;
    value["variant"] = serde_json::json!(config.variant);
    value["exposed_port"] = serde_json::json!(config.variant.exposed_port());
    value["port"] = serde_json::json!(port);
    if let ResolutionResult::NotFound = result {
        let files = list_python_files(&config.search_root, config.diagnostic_limit);
        value["python_files"] = serde_json::json!(display_paths(&files));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn error_json(err: &ResolveError, config: &Config, port: &str) -> Result<String> {
    let mut value = serde_json::json!({
        "outcome": "error",
        "error": err.to_string(),
        "variant": config.variant,
        "port": port,
    });
    if let ResolveError::AmbiguousMatch { matches, .. } = err {
        value["matches"] = serde_json::json!(display_paths(matches));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_kv(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:<CHECK_LABEL_WIDTH$} {value}")
}

fn print_summary(result: &ResolutionResult, config: &Config, port: &str, source: PortSource) {
    match result {
        ResolutionResult::Found(resolution) => {
            println!("{}", format_kv("Outcome:", outcome_style("found")));
            println!(
                "{}",
                format_kv("Entrypoint:", style(resolution.path.display()).cyan())
            );
            println!("{}", format_kv("Source:", source_label(&resolution.source)));
        }
        ResolutionResult::NotFound => {
            println!("{}", format_kv("Outcome:", outcome_style("not found")));
        }
    }
    println!(
        "{}",
        format_kv(
            "Variant:",
            format!(
                "{} (exposes {})",
                config.variant,
                config.variant.exposed_port()
            )
        )
    );
    println!("{}", format_kv("Port:", format_port(port, source)));
    match &config.interpreter {
        Some(interpreter) => println!("{}", format_kv("Interpreter:", interpreter)),
        None => println!("{}", format_kv("Interpreter:", style("(direct exec)").dim())),
    }
}
