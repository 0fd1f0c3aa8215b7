//! Database access for cantodb-ingest

pub mod songs;

pub use songs::{SongStore, StoreError};
