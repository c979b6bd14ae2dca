//! Configuration for hosts embedding a Beacon event registry.
//!
//! A single [`Config`] gathers the logging setup and the registry knobs.
//!
//! # Sources
//!
//! From highest to lowest priority:
//!
//! 1. The TOML file passed to [`Config::load`]
//! 2. Environment variables (`BEACON_*`), only for fields the file left unset
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```rust
//! use beacon_config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [logging]
//!     level = "debug"
//!
//!     [registry]
//!     catch_panics = false
//! "#).unwrap();
//!
//! assert_eq!(config.logging.level, "debug");
//! assert!(!config.registry.catch_panics);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

use beacon_events::RegistryConfig;
use beacon_telemetry::LogConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{ConfigError, ConfigResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `[logging]` section.
    #[serde(default)]
    pub logging: LogConfig,
    /// `[registry]` section.
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl Config {
    /// Parse configuration from TOML text, without environment fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, does not match the
    /// schema, or fails validation.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let root = parse_root(source, "<inline>")?;
        Self::from_value(root, "<inline>")
    }

    /// Load configuration from an optional file plus `BEACON_*` env vars.
    ///
    /// A missing `path` means "defaults and environment only".
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the result
    /// fails validation.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, &env::collect_env_vars())
    }

    /// Same as [`Config::load`] with an explicit environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env<S: BuildHasher>(
        path: Option<&Path>,
        env_vars: &HashMap<String, String, S>,
    ) -> ConfigResult<Self> {
        let (mut root, origin) = match path {
            Some(path) => {
                let origin = path.display().to_string();
                let source =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
                        path: origin.clone(),
                        source,
                    })?;
                (parse_root(&source, &origin)?, origin)
            },
            None => (
                toml::Value::Table(toml::map::Map::new()),
                "<defaults>".to_string(),
            ),
        };

        let applied = env::apply_env_fallbacks(&mut root, env_vars);
        debug!(origin = %origin, env_fallbacks = applied.len(), "Configuration loaded");

        Self::from_value(root, &origin)
    }

    /// Check cross-field rules the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "logging.level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "logging.file_prefix".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn from_value(root: toml::Value, origin: &str) -> ConfigResult<Self> {
        let config: Self = root.try_into().map_err(|source| ConfigError::ParseError {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_root(source: &str, origin: &str) -> ConfigResult<toml::Value> {
    toml::from_str(source).map_err(|source| ConfigError::ParseError {
        origin: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_telemetry::{LogFormat, LogTarget};
    use std::io::Write;

    #[test]
    fn test_empty_source_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_source() {
        let config = Config::from_toml_str(
            r#"
            [logging]
            level = "trace"
            format = "json"
            target = "stdout"
            directives = ["beacon_events=debug"]

            [registry]
            catch_panics = false
            initial_capacity = 128
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.target, LogTarget::Stdout);
        assert_eq!(config.logging.directives, vec!["beacon_events=debug"]);
        assert!(!config.registry.catch_panics);
        assert_eq!(config.registry.initial_capacity, 128);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("[logging\nlevel = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_schema_mismatch_is_parse_error() {
        let err = Config::from_toml_str("[registry]\ncatch_panics = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_empty_level_fails_validation() {
        let err = Config::from_toml_str("[logging]\nlevel = \"  \"").unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logging.level")
        );
    }

    #[test]
    fn test_load_file_with_env_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let env: HashMap<String, String> = [
            ("BEACON_LOG_LEVEL".to_string(), "trace".to_string()),
            ("BEACON_CATCH_PANICS".to_string(), "false".to_string()),
        ]
        .into_iter()
        .collect();

        let config = Config::load_with_env(Some(file.path()), &env).unwrap();

        // The file wins over the environment; the environment fills the gaps.
        assert_eq!(config.logging.level, "warn");
        assert!(!config.registry.catch_panics);
    }

    #[test]
    fn test_load_without_file_uses_env() {
        let env: HashMap<String, String> = [("BEACON_LOG_FORMAT".to_string(), "pretty".to_string())]
            .into_iter()
            .collect();

        let config = Config::load_with_env(None, &env).unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.registry.catch_panics);
    }

    #[test]
    fn test_uppercase_env_log_format_loads() {
        let env: HashMap<String, String> = [("BEACON_LOG_FORMAT".to_string(), "JSON".to_string())]
            .into_iter()
            .collect();

        let config = Config::load_with_env(None, &env).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("beacon.toml");

        let err = Config::load_with_env(Some(&missing), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
