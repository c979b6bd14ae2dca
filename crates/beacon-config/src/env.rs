//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only fill fields the config
//! file left unset.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    /// Enum-valued fields deserialize from lowercase names only.
    lowercase: bool,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "BEACON_LOG_LEVEL",
        field_path: "logging.level",
        lowercase: false,
    },
    EnvMapping {
        var_name: "BEACON_LOG_FORMAT",
        field_path: "logging.format",
        lowercase: true,
    },
    EnvMapping {
        var_name: "BEACON_CATCH_PANICS",
        field_path: "registry.catch_panics",
        lowercase: false,
    },
    EnvMapping {
        var_name: "BEACON_INITIAL_CAPACITY",
        field_path: "registry.initial_capacity",
        lowercase: false,
    },
];

/// Fill unset fields of `root` from `env_vars`.
///
/// Returns the names of the variables that were applied.
pub fn apply_env_fallbacks<S: BuildHasher>(
    root: &mut toml::Value,
    env_vars: &HashMap<String, String, S>,
) -> Vec<&'static str> {
    let mut applied = Vec::new();

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if has_field(root, mapping.field_path) {
            continue;
        }

        let value = if mapping.lowercase {
            coerce(&raw.to_ascii_lowercase())
        } else {
            coerce(raw)
        };
        set_field(root, mapping.field_path, value);
        debug!(var = mapping.var_name, field = mapping.field_path, "Applied env fallback");
        applied.push(mapping.var_name);
    }

    applied
}

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

fn has_field(root: &toml::Value, path: &str) -> bool {
    let mut current = root;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_string(), value);
    }
}

fn coerce(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(raw.to_string())
    }
}
