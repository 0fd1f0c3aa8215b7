//! Service modules for the song sheet ingest pipeline

pub mod document_pipeline;
pub mod file_scanner;
pub mod pattern_loader;
pub mod tag_extractor;
pub mod text_normalizer;

pub use document_pipeline::{DocumentError, DocumentPipeline, ProcessedDocument};
pub use file_scanner::{DocumentScanner, ScanError, ScanResult};
pub use pattern_loader::{PatternError, PatternSet};
pub use tag_extractor::extract_tags;
pub use text_normalizer::{collapse_newlines, normalize_text, TextNormalizer};
