//! Configuration resolution for cantodb-ingest
//!
//! Combines command-line overrides, `CANTODB_*` environment variables, the
//! TOML bootstrap file and the compiled defaults into one [`IngestConfig`].

use cantodb_common::config::{resolve_path, resolve_string, CompiledDefaults, TomlConfig};
use cantodb_common::{Error, Result};
use std::path::PathBuf;

pub const INPUT_DIR_ENV: &str = "CANTODB_INPUT_DIR";
pub const PATTERN_FILE_ENV: &str = "CANTODB_PATTERN_FILE";
pub const DATABASE_ENV: &str = "CANTODB_DATABASE";
pub const EXTENSION_ENV: &str = "CANTODB_EXTENSION";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub pattern_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub extension: Option<String>,
    pub log_level: Option<String>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub input_dir: PathBuf,
    pub pattern_file: PathBuf,
    pub database_path: PathBuf,
    /// File name suffix including the leading dot (e.g. `.tex`)
    pub extension: String,
    pub log_level: String,
}

impl IngestConfig {
    /// Resolve every setting: CLI → ENV → TOML → compiled default
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let input_dir = resolve_path(
            cli.input_dir.as_deref(),
            INPUT_DIR_ENV,
            toml.input_dir.as_deref(),
            &defaults.input_dir,
        );
        let pattern_file = resolve_path(
            cli.pattern_file.as_deref(),
            PATTERN_FILE_ENV,
            toml.pattern_file.as_deref(),
            &defaults.pattern_file,
        );
        let database_path = resolve_path(
            cli.database_path.as_deref(),
            DATABASE_ENV,
            toml.database_path.as_deref(),
            &defaults.database_path,
        );
        let extension = resolve_string(
            cli.extension.as_deref(),
            EXTENSION_ENV,
            toml.extension.as_deref(),
            &defaults.extension,
        );

        // Log level has no environment variable of its own; RUST_LOG covers it
        let log_level = cli
            .log_level
            .clone()
            .or_else(|| toml.logging.level.clone())
            .unwrap_or(defaults.log_level);

        Ok(Self {
            input_dir,
            pattern_file,
            database_path,
            extension: normalize_extension(&extension)?,
            log_level,
        })
    }
}

/// Normalize `tex` or `.tex` to `.tex`
pub fn normalize_extension(extension: &str) -> Result<String> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Document extension must not be empty (got {:?})",
            extension
        )));
    }
    Ok(format!(".{}", trimmed))
}
