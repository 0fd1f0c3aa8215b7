//! Ingest event system
//!
//! The directory driver reports progress as [`IngestEvent`]s through an
//! [`EventSink`]. Where the events end up (operator log, broadcast bus,
//! both) is decided by whoever builds the sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Stage at which a document failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Input file could not be read or decoded
    Read,
    /// Row insertion was rejected by the store
    Insert,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Read => write!(f, "read"),
            FailureStage::Insert => write!(f, "insert"),
        }
    }
}

/// Per-run totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Directory entries examined
    pub scanned: usize,
    /// Rows written to the store
    pub inserted: usize,
    /// Documents that could not be read
    pub read_failures: usize,
    /// Documents whose insertion failed
    pub insert_failures: usize,
    /// Entries ignored (subdirectories, other extensions)
    pub skipped: usize,
    /// Documents stored without pattern cleaning
    pub cleaning_degraded: usize,
}

impl IngestSummary {
    /// Documents the pipeline was attempted on
    pub fn attempted(&self) -> usize {
        self.inserted + self.read_failures + self.insert_failures
    }

    /// Total per-file failures
    pub fn failures(&self) -> usize {
        self.read_failures + self.insert_failures
    }
}

/// Ingest event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IngestEvent {
    /// Directory run started
    RunStarted {
        input_dir: String,
        timestamp: DateTime<Utc>,
    },

    /// Removal patterns were not applied to a document
    CleaningDegraded {
        file: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Document stored
    DocumentInserted {
        file: String,
        identifier: String,
        timestamp: DateTime<Utc>,
    },

    /// Document skipped after a recoverable error
    DocumentFailed {
        file: String,
        stage: FailureStage,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Directory run finished
    RunCompleted {
        summary: IngestSummary,
        timestamp: DateTime<Utc>,
    },
}

impl IngestEvent {
    pub fn run_started(input_dir: impl Into<String>) -> Self {
        IngestEvent::RunStarted {
            input_dir: input_dir.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn cleaning_degraded(file: impl Into<String>, reason: impl Into<String>) -> Self {
        IngestEvent::CleaningDegraded {
            file: file.into(),
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn document_inserted(file: impl Into<String>, identifier: impl Into<String>) -> Self {
        IngestEvent::DocumentInserted {
            file: file.into(),
            identifier: identifier.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn document_failed(
        file: impl Into<String>,
        stage: FailureStage,
        error: impl Into<String>,
    ) -> Self {
        IngestEvent::DocumentFailed {
            file: file.into(),
            stage,
            error: error.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn run_completed(summary: IngestSummary) -> Self {
        IngestEvent::RunCompleted {
            summary,
            timestamp: Utc::now(),
        }
    }

    /// Short event name for logs
    pub fn event_type(&self) -> &'static str {
        match self {
            IngestEvent::RunStarted { .. } => "RunStarted",
            IngestEvent::CleaningDegraded { .. } => "CleaningDegraded",
            IngestEvent::DocumentInserted { .. } => "DocumentInserted",
            IngestEvent::DocumentFailed { .. } => "DocumentFailed",
            IngestEvent::RunCompleted { .. } => "RunCompleted",
        }
    }
}

/// Destination for ingest events
pub trait EventSink {
    fn emit(&self, event: IngestEvent);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: IngestEvent) {
        (**self).emit(event)
    }
}

/// Writes events to the operator log through `tracing`
///
/// One line per event; failures at `error`, degraded cleaning at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: IngestEvent) {
        match &event {
            IngestEvent::RunStarted { input_dir, .. } => {
                info!("Processing directory {}", input_dir);
            }
            IngestEvent::CleaningDegraded { file, reason, .. } => {
                warn!("Cleaning skipped for {}: {}", file, reason);
            }
            IngestEvent::DocumentInserted { file, identifier, .. } => {
                info!("Inserted {} (identifier '{}')", file, identifier);
            }
            IngestEvent::DocumentFailed { file, stage, error, .. } => {
                error!("Failed to {} {}: {}", stage, file, error);
            }
            IngestEvent::RunCompleted { summary, .. } => {
                info!(
                    "Run complete: {} inserted, {} read failures, {} insert failures, {} skipped ({} without cleaning)",
                    summary.inserted,
                    summary.read_failures,
                    summary.insert_failures,
                    summary.skipped,
                    summary.cleaning_degraded
                );
            }
        }
    }
}

/// Broadcast bus for ingest events
///
/// Uses `tokio::sync::broadcast`, so publishing never blocks and events
/// emitted before a receiver subscribes are not delivered to it.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<IngestEvent>,
}

impl EventBus {
    /// Creates a new EventBus buffering up to `capacity` events per receiver
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<IngestEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    pub fn send(
        &self,
        event: IngestEvent,
    ) -> Result<usize, broadcast::error::SendError<IngestEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: IngestEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("No subscribers for {} event", e.0.event_type());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: IngestEvent) {
        self.emit_lossy(event);
    }
}

/// Forwards every event to each contained sink in order
#[derive(Default)]
pub struct FanOutSink {
    sinks: Vec<Box<dyn EventSink + Send + Sync>>,
}

impl FanOutSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: impl EventSink + Send + Sync + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanOutSink {
    fn emit(&self, event: IngestEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}
