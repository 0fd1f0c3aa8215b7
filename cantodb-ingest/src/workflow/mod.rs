//! Directory ingest workflow
//!
//! One run processes a folder sequentially:
//! 1. Open the store and reset the `songs` table
//! 2. Load the removal patterns once (degrading on failure)
//! 3. List the folder and process each song sheet in name order
//! 4. Insert one row per readable document

pub mod directory_driver;

pub use directory_driver::DirectoryDriver;

use crate::config::IngestConfig;
use crate::db::SongStore;
use crate::error::IngestResult;
use crate::services::{DocumentPipeline, DocumentScanner, PatternSet, TextNormalizer};
use cantodb_common::events::{EventSink, IngestSummary};
use tracing::{info, warn};

/// Run a full ingest with the given configuration
///
/// Fails only when the store cannot be initialized or the input folder
/// cannot be listed. Per-document failures are reported to `sink`.
pub async fn run_ingest<S: EventSink>(config: &IngestConfig, sink: &S) -> IngestResult<IngestSummary> {
    let store = SongStore::open(&config.database_path).await?;
    store.reset_schema().await?;

    let normalizer = TextNormalizer::from_load_result(PatternSet::load(&config.pattern_file));
    let pipeline = DocumentPipeline::new(normalizer);
    let scanner = DocumentScanner::new(config.extension.clone());

    let result = DirectoryDriver::new(&store, pipeline, scanner, sink)
        .run(&config.input_dir)
        .await;

    if result.is_ok() {
        match store.count().await {
            Ok(rows) => info!("{} rows in {}", rows, config.database_path.display()),
            Err(e) => warn!("Could not count stored rows: {}", e),
        }
    }

    store.close().await;
    result
}
