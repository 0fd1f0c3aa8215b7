//! cantodb-ingest library interface
//!
//! Loads a folder of song sheets into the `songs` table: metadata tags are
//! extracted from each sheet, the body is cleaned with a list of removal
//! patterns, and both raw and cleaned text are stored.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{IngestError, IngestResult};
pub use crate::workflow::run_ingest;
