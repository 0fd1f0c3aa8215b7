//! Text normalization
//!
//! Cleaning runs in three steps:
//! 1. every removal pattern, in order, deletes all of its matches from the
//!    output of the previous pattern
//! 2. runs of three or more `\n` collapse to exactly two
//! 3. `\n` characters at the very start are stripped
//!
//! When the pattern source could not be loaded the normalizer is
//! *degraded*: every document passes through unchanged, newlines
//! included. Patterns are never partially applied.

use super::pattern_loader::{PatternError, PatternSet};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static MULTIPLE_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern is a valid regex"));

/// Remove every match of each pattern, in order, from `content`
pub fn apply_patterns(content: &str, patterns: &PatternSet) -> String {
    let mut cleaned = content.to_string();
    for regex in patterns.regexes() {
        cleaned = regex.replace_all(&cleaned, "").into_owned();
    }
    cleaned
}

/// Collapse blank-line runs and strip leading newlines
pub fn collapse_newlines(content: &str) -> String {
    let collapsed = MULTIPLE_NEWLINES.replace_all(content, "\n\n");
    collapsed.trim_start_matches('\n').to_string()
}

/// Full cleaning pass with the given patterns
pub fn normalize_text(content: &str, patterns: &PatternSet) -> String {
    collapse_newlines(&apply_patterns(content, patterns))
}

/// Normalizer bound to the pattern load outcome of one run
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    mode: CleaningMode,
}

#[derive(Debug, Clone)]
enum CleaningMode {
    Patterns(PatternSet),
    Degraded { reason: String },
}

impl TextNormalizer {
    /// Normalizer applying `patterns`
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            mode: CleaningMode::Patterns(patterns),
        }
    }

    /// Normalizer that returns text unchanged
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            mode: CleaningMode::Degraded {
                reason: reason.into(),
            },
        }
    }

    /// Build from a pattern load result, degrading on error
    pub fn from_load_result(result: Result<PatternSet, PatternError>) -> Self {
        match result {
            Ok(patterns) => Self::new(patterns),
            Err(e) => {
                warn!("Removal patterns unavailable, text will not be cleaned: {}", e);
                Self::degraded(e.to_string())
            }
        }
    }

    /// Whether removal patterns are applied
    pub fn applies_patterns(&self) -> bool {
        matches!(self.mode, CleaningMode::Patterns(_))
    }

    /// Why cleaning is skipped, if it is
    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.mode {
            CleaningMode::Patterns(_) => None,
            CleaningMode::Degraded { reason } => Some(reason.as_str()),
        }
    }

    pub fn normalize(&self, content: &str) -> String {
        match &self.mode {
            CleaningMode::Patterns(patterns) => normalize_text(content, patterns),
            CleaningMode::Degraded { .. } => content.to_string(),
        }
    }
}
