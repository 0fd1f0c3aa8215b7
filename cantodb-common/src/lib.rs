//! # cantodb Common Library
//!
//! Shared code for the cantodb tools including:
//! - Error type and result alias
//! - Bootstrap configuration loading (TOML + environment + compiled defaults)
//! - Ingest event types, event bus and sinks
//! - SQLite connection initialization

pub mod config;
pub mod db;
pub mod error;
pub mod events;

pub use error::{Error, Result};
