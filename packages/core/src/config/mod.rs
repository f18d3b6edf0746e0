//! Launcher configuration
//!
//! Layers, lowest precedence first: built-in defaults, the JSONC config file,
//! then environment overrides. Command-line overrides are applied by the CLI
//! on top of the result.

pub mod schema;
pub mod validation;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use schema::Config;
pub use validation::{ValidationError, ValidationWarning, validate_config};

/// Path of the config file to load
pub const CONFIG_ENV: &str = "ENTRYPOINT_CONFIG";

/// Pinned entrypoint script
pub const ENTRYPOINT_SCRIPT_ENV: &str = "ENTRYPOINT_SCRIPT";

/// Root directory of the fallback search
pub const SEARCH_ROOT_ENV: &str = "ENTRYPOINT_SEARCH_ROOT";

/// Build variant (`http` or `grpc`)
pub const VARIANT_ENV: &str = "ENTRYPOINT_VARIANT";

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Invalid {
            field: err.field,
            message: err.message,
        }
    }
}

/// Parse a JSONC document into a [`Config`]
pub fn parse_config(text: &str, origin: &Path) -> Result<Config, ConfigError> {
    let parse_err = |message: String| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    };

    let value = jsonc_parser::parse_to_serde_value(text, &Default::default())
        .map_err(|e| parse_err(e.to_string()))?
        .ok_or_else(|| parse_err("config file is empty".to_string()))?;

    serde_json::from_value(value).map_err(|e| parse_err(e.to_string()))
}

/// Load the config file at `path`
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, path)?;
    debug!(path = %path.display(), "loaded launcher config");
    Ok(config)
}

/// Load the config file named by `path` or `ENTRYPOINT_CONFIG`, or fall back to defaults
///
/// A file that is named but missing is an error; no file named is not.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    match path.map(Path::to_path_buf).or(from_env) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

/// Apply `ENTRYPOINT_*` overrides from `lookup` (normally the process environment)
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(script) = lookup(ENTRYPOINT_SCRIPT_ENV) {
        config.entrypoint = Some(PathBuf::from(script));
    }
    if let Some(root) = lookup(SEARCH_ROOT_ENV) {
        config.search_root = PathBuf::from(root);
    }
    if let Some(variant) = lookup(VARIANT_ENV) {
        config.variant = variant.parse()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AmbiguityPolicy;
    use crate::variant::BuildVariant;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_accepts_comments_and_trailing_commas() {
        let text = r#"{
            // pinned at build time
            "version": 1,
            "entrypoint": "/app/run_server.py",
            "on_ambiguous": "first",
        }"#;
        let config = parse_config(text, Path::new("launcher.jsonc")).unwrap();
        assert_eq!(config.entrypoint, Some(PathBuf::from("/app/run_server.py")));
        assert_eq!(config.on_ambiguous, AmbiguityPolicy::First);
    }

    #[test]
    fn parse_reports_unknown_fields_with_origin() {
        let err = parse_config(r#"{"version": 1, "port": 8080}"#, Path::new("/etc/x.jsonc"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("/etc/x.jsonc"));
    }

    #[test]
    fn parse_rejects_empty_document() {
        let err = parse_config("   ", Path::new("empty.jsonc")).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launcher.jsonc");
        fs::write(&path, r#"{"version": 1, "variant": "grpc"}"#).unwrap();

        let config = load_config_or_default(Some(&path)).unwrap();
        assert_eq!(config.variant, BuildVariant::Grpc);
    }

    #[test]
    fn load_missing_named_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("missing.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENTRYPOINT_SCRIPT_ENV, "/srv/server.py"),
            (SEARCH_ROOT_ENV, "/srv"),
            (VARIANT_ENV, "grpc"),
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.entrypoint, Some(PathBuf::from("/srv/server.py")));
        assert_eq!(config.search_root, PathBuf::from("/srv"));
        assert_eq!(config.variant, BuildVariant::Grpc);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |_| Some("  ".to_string())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_variant_in_env_is_rejected() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, |k| {
            (k == VARIANT_ENV).then(|| "websocket".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVariant(_)));
    }

    #[test]
    fn example_config_parses_and_validates() {
        let text = include_str!("../../../../schemas/launcher.example.jsonc");
        let config = parse_config(text, Path::new("launcher.example.jsonc")).unwrap();
        assert_eq!(config.variant, BuildVariant::Grpc);
        assert_eq!(config.candidate_list().len(), 3);
        assert!(validate_config(&config).unwrap().is_empty());
    }

    #[test]
    fn validation_error_converts_to_invalid() {
        let err: ConfigError = ValidationError {
            field: "search_root".to_string(),
            message: "must be absolute".to_string(),
            fix: String::new(),
        }
        .into();
        assert!(err.to_string().contains("search_root"));
    }
}
