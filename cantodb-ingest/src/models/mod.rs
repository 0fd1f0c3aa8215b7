//! Data models for cantodb-ingest

pub mod song;

pub use song::{SongMetadata, TagField};
