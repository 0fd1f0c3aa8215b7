//! cantodb-ingest - Song sheet archive loader
//!
//! Reads every song sheet in the input folder, extracts its `%tag{value}`
//! metadata, cleans the body with the removal patterns and stores both
//! texts in a freshly reset `songs` table.
//!
//! Runs with no arguments using the compiled defaults
//! (`archivio-canzoni`, `regex.txt`, `songs.db`).

use anyhow::{Context, Result};
use cantodb_common::config::{load_bootstrap_config, CompiledDefaults};
use cantodb_common::events::TracingEventSink;
use cantodb_ingest::config::{CliOverrides, IngestConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "cantodb-ingest")]
#[command(about = "Load a folder of song sheets into a SQLite database")]
#[command(version)]
struct Args {
    /// Folder containing the song sheets
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// File with one removal pattern per line
    #[arg(short, long = "patterns")]
    pattern_file: Option<PathBuf>,

    /// SQLite database file (table is reset on every run)
    #[arg(short, long = "database")]
    database_path: Option<PathBuf>,

    /// Song sheet file extension
    #[arg(long)]
    extension: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "CANTODB_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input_dir: self.input_dir.clone(),
            pattern_file: self.pattern_file.clone(),
            database_path: self.database_path.clone(),
            extension: self.extension.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Installed before the config is read so config warnings are visible.
    // RUST_LOG wins over any configured level.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_from_env = env_filter.is_some();
    let initial_filter = env_filter.unwrap_or_else(|| {
        let level = args
            .log_level
            .clone()
            .unwrap_or_else(|| CompiledDefaults::default().log_level);
        EnvFilter::new(level)
    });
    let (filter, filter_handle) = reload::Layer::new(initial_filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let toml_config =
        load_bootstrap_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = IngestConfig::resolve(&args.overrides(), &toml_config)
        .context("Invalid configuration")?;

    if !level_from_env {
        filter_handle
            .reload(EnvFilter::new(&config.log_level))
            .context("Failed to apply log level")?;
    }

    info!(
        "Starting cantodb-ingest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Input folder: {}", config.input_dir.display());
    info!("Pattern file: {}", config.pattern_file.display());
    info!("Database: {}", config.database_path.display());

    let summary = cantodb_ingest::run_ingest(&config, &TracingEventSink).await?;

    info!(
        "Processed {} of {} entries ({} failed)",
        summary.attempted(),
        summary.scanned,
        summary.failures()
    );

    Ok(())
}
