//! Song sheet metadata record
//!
//! One record per input document: ten tagged fields plus the full and
//! simplified text. Absent tags leave the field as the empty string.

use serde::{Deserialize, Serialize};

/// Recognized metadata tags, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Author,
    Album,
    Key,
    Family,
    Group,
    Moments,
    Identifier,
    RevisionDate,
    Transcriber,
}

impl TagField {
    /// All recognized fields, in column order
    pub const ALL: [TagField; 10] = [
        TagField::Title,
        TagField::Author,
        TagField::Album,
        TagField::Key,
        TagField::Family,
        TagField::Group,
        TagField::Moments,
        TagField::Identifier,
        TagField::RevisionDate,
        TagField::Transcriber,
    ];

    /// Map a lowercased tag name to its field
    ///
    /// Returns `None` for names outside the recognized set.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "titolo" => Some(TagField::Title),
            "autore" => Some(TagField::Author),
            "album" => Some(TagField::Album),
            "tonalita" => Some(TagField::Key),
            "famiglia" => Some(TagField::Family),
            "gruppo" => Some(TagField::Group),
            "momenti" => Some(TagField::Moments),
            "identificatore" => Some(TagField::Identifier),
            "data_revisione" => Some(TagField::RevisionDate),
            "trascrittore" => Some(TagField::Transcriber),
            _ => None,
        }
    }

    /// Tag name as written in song sheets
    pub fn tag_name(self) -> &'static str {
        match self {
            TagField::Title => "titolo",
            TagField::Author => "autore",
            TagField::Album => "album",
            TagField::Key => "tonalita",
            TagField::Family => "famiglia",
            TagField::Group => "gruppo",
            TagField::Moments => "momenti",
            TagField::Identifier => "identificatore",
            TagField::RevisionDate => "data_revisione",
            TagField::Transcriber => "trascrittore",
        }
    }
}

/// Metadata record for one song sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMetadata {
    pub title: String,
    pub author: String,
    pub album: String,
    /// Musical key (tonality)
    pub key: String,
    pub family: String,
    pub group: String,
    /// Liturgical moments the song is used in
    pub moments: String,
    /// Unique key in the store
    pub identifier: String,
    pub revision_date: String,
    pub transcriber: String,
    /// Unmodified document contents
    pub full_text: String,
    /// Contents after normalization
    pub simplified_text: String,
}

impl SongMetadata {
    /// Value of a tagged field
    pub fn field(&self, field: TagField) -> &str {
        match field {
            TagField::Title => &self.title,
            TagField::Author => &self.author,
            TagField::Album => &self.album,
            TagField::Key => &self.key,
            TagField::Family => &self.family,
            TagField::Group => &self.group,
            TagField::Moments => &self.moments,
            TagField::Identifier => &self.identifier,
            TagField::RevisionDate => &self.revision_date,
            TagField::Transcriber => &self.transcriber,
        }
    }

    /// Overwrite a tagged field
    pub fn set_field(&mut self, field: TagField, value: impl Into<String>) {
        let slot = match field {
            TagField::Title => &mut self.title,
            TagField::Author => &mut self.author,
            TagField::Album => &mut self.album,
            TagField::Key => &mut self.key,
            TagField::Family => &mut self.family,
            TagField::Group => &mut self.group,
            TagField::Moments => &mut self.moments,
            TagField::Identifier => &mut self.identifier,
            TagField::RevisionDate => &mut self.revision_date,
            TagField::Transcriber => &mut self.transcriber,
        };
        *slot = value.into();
    }
}
