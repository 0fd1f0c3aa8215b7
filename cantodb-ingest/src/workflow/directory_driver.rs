//! Directory driver
//!
//! Runs the document pipeline and the store writer once per song sheet,
//! strictly one document at a time. Read and insert failures are reported
//! and skipped; only an unlistable folder stops the run.

use crate::db::SongStore;
use crate::error::IngestResult;
use crate::services::{DocumentPipeline, DocumentScanner};
use cantodb_common::events::{EventSink, FailureStage, IngestEvent, IngestSummary};
use std::path::Path;

pub struct DirectoryDriver<'a, S: EventSink> {
    store: &'a SongStore,
    pipeline: DocumentPipeline,
    scanner: DocumentScanner,
    sink: &'a S,
}

impl<'a, S: EventSink> DirectoryDriver<'a, S> {
    pub fn new(
        store: &'a SongStore,
        pipeline: DocumentPipeline,
        scanner: DocumentScanner,
        sink: &'a S,
    ) -> Self {
        Self {
            store,
            pipeline,
            scanner,
            sink,
        }
    }

    /// Process every song sheet directly inside `input_dir`
    pub async fn run(&self, input_dir: &Path) -> IngestResult<IngestSummary> {
        self.sink
            .emit(IngestEvent::run_started(input_dir.display().to_string()));

        let scan = self.scanner.scan(input_dir)?;

        let mut summary = IngestSummary {
            scanned: scan.scanned(),
            skipped: scan.skipped.len(),
            ..Default::default()
        };

        for path in &scan.documents {
            self.process_document(path, &mut summary).await;
        }

        self.sink.emit(IngestEvent::run_completed(summary.clone()));
        Ok(summary)
    }

    async fn process_document(&self, path: &Path, summary: &mut IngestSummary) {
        let file = path.display().to_string();

        let document = match self.pipeline.process_file(path) {
            Ok(document) => document,
            Err(e) => {
                summary.read_failures += 1;
                self.sink
                    .emit(IngestEvent::document_failed(file, FailureStage::Read, e.to_string()));
                return;
            }
        };

        if !document.cleaning_applied {
            summary.cleaning_degraded += 1;
            let reason = self
                .pipeline
                .normalizer()
                .degraded_reason()
                .unwrap_or("removal patterns unavailable");
            self.sink
                .emit(IngestEvent::cleaning_degraded(file.clone(), reason));
        }

        match self.store.insert(&document.metadata).await {
            Ok(()) => {
                summary.inserted += 1;
                self.sink.emit(IngestEvent::document_inserted(
                    file,
                    document.metadata.identifier.clone(),
                ));
            }
            Err(e) => {
                summary.insert_failures += 1;
                self.sink
                    .emit(IngestEvent::document_failed(file, FailureStage::Insert, e.to_string()));
            }
        }
    }
}
