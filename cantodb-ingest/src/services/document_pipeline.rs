//! Per-document processing
//!
//! Reads one song sheet, extracts its tags and cleans its text. Reading is
//! the only step that can fail; cleaning falls back to the normalizer's
//! degraded mode instead.

use super::tag_extractor::extract_tags;
use super::text_normalizer::TextNormalizer;
use crate::models::SongMetadata;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document read errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File could not be opened or read
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },
}

/// Result of processing one document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub metadata: SongMetadata,
    /// False when the removal patterns were skipped
    pub cleaning_applied: bool,
}

/// Tag extraction + text normalization for one run
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    normalizer: TextNormalizer,
}

impl DocumentPipeline {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Build the record for already-loaded document text
    pub fn process_text(&self, content: String) -> ProcessedDocument {
        let mut metadata = extract_tags(&content);
        metadata.simplified_text = self.normalizer.normalize(&content);
        metadata.full_text = content;

        ProcessedDocument {
            metadata,
            cleaning_applied: self.normalizer.applies_patterns(),
        }
    }

    /// Read `path` and build its record
    pub fn process_file(&self, path: &Path) -> Result<ProcessedDocument, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let content = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        Ok(self.process_text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pattern_loader::PatternSet;

    fn pipeline(patterns: &str) -> DocumentPipeline {
        DocumentPipeline::new(TextNormalizer::new(
            PatternSet::parse("test", patterns).unwrap(),
        ))
    }

    #[test]
    fn test_process_text_fills_every_field() {
        let doc = pipeline("%[a-z_]+\\{[^}]*\\}")
            .process_text("%titolo{Canto}\n%identificatore{7}\n\n\n\nLa la".to_string());

        assert!(doc.cleaning_applied);
        assert_eq!(doc.metadata.title, "Canto");
        assert_eq!(doc.metadata.identifier, "7");
        assert_eq!(doc.metadata.full_text, "%titolo{Canto}\n%identificatore{7}\n\n\n\nLa la");
        assert_eq!(doc.metadata.simplified_text, "La la");
    }

    #[test]
    fn test_tags_come_from_raw_text() {
        // Removal patterns never hide tags from extraction
        let doc = pipeline("%.*").process_text("%autore{Anonimo}\ntesto".to_string());
        assert_eq!(doc.metadata.author, "Anonimo");
        assert_eq!(doc.metadata.simplified_text, "testo");
    }

    #[test]
    fn test_degraded_pipeline_marks_document() {
        let doc = DocumentPipeline::new(TextNormalizer::degraded("no patterns"))
            .process_text("\n\nx".to_string());
        assert!(!doc.cleaning_applied);
        assert_eq!(doc.metadata.simplified_text, "\n\nx");
        assert_eq!(doc.metadata.simplified_text, doc.metadata.full_text);
    }

    #[test]
    fn test_process_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = pipeline("").process_file(&dir.path().join("absent.tex")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_process_invalid_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.tex");
        std::fs::write(&path, [b'%', 0xE0, 0xFF, b'\n']).unwrap();

        let err = pipeline("").process_file(&path).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_process_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canto.tex");
        std::fs::write(&path, "%titolo{Alleluia}\n\n\n\nAlleluia").unwrap();

        let doc = pipeline("").process_file(&path).unwrap();
        assert_eq!(doc.metadata.title, "Alleluia");
        assert_eq!(doc.metadata.simplified_text, "%titolo{Alleluia}\n\nAlleluia");
    }
}
