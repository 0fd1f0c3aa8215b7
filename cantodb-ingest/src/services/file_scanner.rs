//! Song sheet discovery
//!
//! Lists the immediate entries of the input folder (no recursion) in file
//! name order and keeps regular files whose name ends with the configured
//! extension. Symlinks are followed when classifying an entry.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Folder listing errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory could not be listed
    #[error("Cannot list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Entries found in one folder
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Song sheets to process, in file name order
    pub documents: Vec<PathBuf>,
    /// Everything else (subdirectories, other extensions, unreadable entries)
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    /// Number of entries examined
    pub fn scanned(&self) -> usize {
        self.documents.len() + self.skipped.len()
    }
}

/// Non-recursive scanner for song sheet files
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    /// Required file name suffix, including the dot
    suffix: String,
}

impl DocumentScanner {
    /// Scanner for files ending in `suffix` (e.g. `.tex`)
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Whether a file name carries the song sheet extension
    pub fn matches_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    /// List song sheets directly inside `dir`
    pub fn scan(&self, dir: &Path) -> Result<ScanResult, ScanError> {
        if !dir.exists() {
            return Err(ScanError::PathNotFound(dir.to_path_buf()));
        }

        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }

        let mut result = ScanResult::default();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_document = entry.file_type().is_file()
                        && self.matches_name(&entry.file_name().to_string_lossy());
                    if is_document {
                        result.documents.push(entry.into_path());
                    } else {
                        tracing::debug!("Skipping {}", entry.path().display());
                        result.skipped.push(entry.into_path());
                    }
                }
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Unreadable {
                        path: dir.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    // Broken symlinks and the like; keep listing
                    tracing::warn!("Error accessing entry: {}", e);
                    if let Some(path) = e.path() {
                        result.skipped.push(path.to_path_buf());
                    }
                }
            }
        }

        tracing::debug!(
            "Scan of {} complete: {} documents, {} skipped",
            dir.display(),
            result.documents.len(),
            result.skipped.len()
        );

        Ok(result)
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new(".tex")
    }
}
