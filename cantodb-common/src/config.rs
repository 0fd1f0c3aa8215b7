//! Bootstrap configuration loading and setting resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is never fatal: a warning is logged and the
//! compiled defaults apply.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CANTODB_CONFIG";

/// Bootstrap configuration loaded from TOML file
///
/// All fields are optional; anything left out falls through to the
/// compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the song sheets
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    /// Line-delimited file of removal patterns
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,

    /// SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Song sheet file extension (with or without leading dot)
    #[serde(default)]
    pub extension: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Compiled-in defaults, used when nothing else provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub input_dir: PathBuf,
    pub pattern_file: PathBuf,
    pub database_path: PathBuf,
    pub extension: String,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("archivio-canzoni"),
            pattern_file: PathBuf::from("regex.txt"),
            database_path: PathBuf::from("songs.db"),
            extension: "tex".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Load a TOML config file
///
/// A missing file yields `TomlConfig::default()` with a warning.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Locate the config file to load, if any
///
/// Explicit path → `CANTODB_CONFIG` → `<config dir>/cantodb/config.toml`
/// when that file exists. Returns `None` when no file applies.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("cantodb").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load the config file chosen by [`locate_config_file`], or defaults
pub fn load_bootstrap_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match locate_config_file(explicit) {
        Some(path) => load_toml_config(&path),
        None => Ok(TomlConfig::default()),
    }
}

/// Resolve a path setting: CLI → ENV → TOML → default
pub fn resolve_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_value: Option<&Path>,
    default: &Path,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(value) = env_value(env_var_name) {
        return PathBuf::from(value);
    }

    if let Some(path) = toml_value {
        return path.to_path_buf();
    }

    default.to_path_buf()
}

/// Resolve a string setting: CLI → ENV → TOML → default
pub fn resolve_string(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: &str,
) -> String {
    if let Some(value) = cli_arg {
        return value.to_string();
    }

    if let Some(value) = env_value(env_var_name) {
        return value;
    }

    toml_value.unwrap_or(default).to_string()
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
