//! Inline metadata tag extraction
//!
//! Song sheets carry their metadata as `%name{value}` markers anywhere in
//! the text. Names are matched case-insensitively against the recognized
//! set in [`TagField`]; everything else is ignored. A value runs up to the
//! first `}` (there is no escaping), and when a tag repeats the last
//! occurrence wins.

use crate::models::{SongMetadata, TagField};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%([a-zA-Z_]+)\{([^}]*)\}").expect("tag pattern is a valid regex")
});

/// Extract recognized tags from `content`
///
/// Only the ten tagged fields are populated; `full_text` and
/// `simplified_text` are left empty for the caller to fill.
pub fn extract_tags(content: &str) -> SongMetadata {
    let mut metadata = SongMetadata::default();

    for caps in TAG_PATTERN.captures_iter(content) {
        let name = caps[1].to_ascii_lowercase();
        match TagField::from_tag_name(&name) {
            Some(field) => metadata.set_field(field, &caps[2]),
            None => tracing::trace!("Ignoring unrecognized tag %{}", name),
        }
    }

    metadata
}
