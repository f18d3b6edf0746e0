//! Configuration validation with actionable error messages
//!
//! Validates the configuration and tells the operator exactly what to change.

use super::schema::Config;
use crate::pattern::SearchPattern;
use crate::resolver::AmbiguityPolicy;
use console::style;
use std::collections::HashSet;

/// A configuration validation error with an actionable fix
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The config field that has an error
    pub field: String,
    /// Description of what's wrong
    pub message: String,
    /// What to set instead
    pub fix: String,
}

/// A configuration validation warning (non-fatal)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The config field with a potential issue
    pub field: String,
    /// Description of the warning
    pub message: String,
    /// Suggested change
    pub fix: String,
}

/// Validate configuration and return warnings or first error
///
/// Returns Ok(warnings) if validation passes (possibly with non-fatal warnings).
/// Returns Err(error) on the first fatal validation error encountered.
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>, ValidationError> {
    let mut warnings = Vec::new();

    if let Err(err) = SearchPattern::new(&config.search_pattern) {
        return Err(ValidationError {
            field: "search_pattern".to_string(),
            message: err.to_string(),
            fix: r#""search_pattern": "*server*.py""#.to_string(),
        });
    }

    if !config.search_root.is_absolute() {
        return Err(ValidationError {
            field: "search_root".to_string(),
            message: format!(
                "search_root must be an absolute path, got '{}'",
                config.search_root.display()
            ),
            fix: r#""search_root": "/app""#.to_string(),
        });
    }

    if let Some(entrypoint) = &config.entrypoint
        && !entrypoint.is_absolute()
    {
        return Err(ValidationError {
            field: "entrypoint".to_string(),
            message: format!(
                "entrypoint must be an absolute path, got '{}'",
                entrypoint.display()
            ),
            fix: r#""entrypoint": "/app/run_server.py""#.to_string(),
        });
    }

    // Ranks come from position, so a repeated path would be two ranks for one file
    let mut seen = HashSet::new();
    for candidate in config.candidate_list().iter() {
        if !candidate.path.is_absolute() {
            return Err(ValidationError {
                field: "candidates".to_string(),
                message: format!(
                    "candidate #{} must be an absolute path, got '{}'",
                    candidate.rank,
                    candidate.path.display()
                ),
                fix: "list absolute paths under the search root".to_string(),
            });
        }
        if !seen.insert(candidate.path.clone()) {
            return Err(ValidationError {
                field: "candidates".to_string(),
                message: format!(
                    "candidate '{}' is listed more than once",
                    candidate.path.display()
                ),
                fix: "remove the duplicate entry".to_string(),
            });
        }
    }

    if config.diagnostic_limit == 0 {
        return Err(ValidationError {
            field: "diagnostic_limit".to_string(),
            message: "diagnostic_limit must be > 0".to_string(),
            fix: r#""diagnostic_limit": 10"#.to_string(),
        });
    }

    if config.default_port == 0 {
        return Err(ValidationError {
            field: "default_port".to_string(),
            message: "default_port must be > 0".to_string(),
            fix: r#""default_port": 8080"#.to_string(),
        });
    }

    // Warnings (non-fatal)

    if config.entrypoint.is_none() && config.candidate_list().is_empty() {
        warnings.push(ValidationWarning {
            field: "candidates".to_string(),
            message: "No candidates and no entrypoint; every start relies on the fallback search"
                .to_string(),
            fix: r#""entrypoint": "/app/run_server.py""#.to_string(),
        });
    }

    if config.on_ambiguous == AmbiguityPolicy::First {
        warnings.push(ValidationWarning {
            field: "on_ambiguous".to_string(),
            message: "Ambiguous fallback matches will be resolved by traversal order".to_string(),
            fix: r#""on_ambiguous": "reject""#.to_string(),
        });
    }

    Ok(warnings)
}

/// Display validation error with styling
pub fn display_validation_error(error: &ValidationError) {
    eprintln!(
        "{} Invalid config field '{}'",
        style("Error:").red().bold(),
        style(&error.field).yellow()
    );
    eprintln!();
    eprintln!("  {}", error.message);
    eprintln!();
    eprintln!("  {} {}", style("Fix:").cyan(), error.fix);
}

/// Display validation warning with styling
pub fn display_validation_warning(warning: &ValidationWarning) {
    eprintln!(
        "{} {} ({})",
        style("Warning:").yellow().bold(),
        warning.message,
        style(&warning.field).dim()
    );
    eprintln!("  {} {}", style("Suggestion:").dim(), warning.fix);
}
