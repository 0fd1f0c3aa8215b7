//! Removal pattern loading
//!
//! A pattern source is a text file with one regular expression per line.
//! Empty lines are skipped; every other line is taken exactly as written
//! (only the `\n` or `\r\n` terminator is removed). All patterns are
//! compiled up front, so a single malformed line rejects the whole set.

use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Pattern loading errors
#[derive(Debug, Error)]
pub enum PatternError {
    /// Pattern source could not be opened or read
    #[error("Cannot read pattern file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line failed to compile as a regular expression
    #[error("Invalid pattern at {source_name}:{line} ({pattern:?}): {source}")]
    InvalidPattern {
        source_name: String,
        line: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Ordered, compiled removal patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// A set with no patterns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and compile patterns from a file
    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let content = std::fs::read_to_string(path).map_err(|source| PatternError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::parse(&path.display().to_string(), &content)?;
        debug!("Loaded {} removal patterns from {}", set.len(), path.display());
        Ok(set)
    }

    /// Compile patterns from source text
    ///
    /// `source_name` only appears in error messages.
    pub fn parse(source_name: &str, content: &str) -> Result<Self, PatternError> {
        let mut patterns = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let regex = Regex::new(line).map_err(|source| PatternError::InvalidPattern {
                source_name: source_name.to_string(),
                line: index + 1,
                pattern: line.to_string(),
                source,
            })?;
            patterns.push(regex);
        }

        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Compiled patterns in file order
    pub fn regexes(&self) -> impl Iterator<Item = &Regex> {
        self.patterns.iter()
    }

    /// Pattern sources in file order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}
