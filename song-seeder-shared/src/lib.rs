//! # Song Seeder Shared
//!
//! Document types shared between the generator, the bulk driver and the
//! search backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the index the music backend searches.
pub const DEFAULT_INDEX: &str = "music_id3";

/// The `_source` of a single song document.
///
/// Serialized as a flat JSON object. `release_date` is rendered as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDocument {
    /// Copy of the document key.
    pub song_id: Uuid,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub release_date: NaiveDate,
    pub year: i32,
    pub genre: String,
    pub composer: String,
    pub lyrics: String,
    pub duration_ms: u32,
    pub comment: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

/// A single bulk action: the target index, the document key and the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongAction {
    /// Target index (collection) name.
    pub index: String,
    /// Document key, used as `_id`.
    pub id: Uuid,
    /// Document source.
    pub document: SongDocument,
}

impl SongAction {
    /// Create an action for the given index, keyed by the document's `song_id`.
    pub fn new(index: impl Into<String>, document: SongDocument) -> Self {
        Self {
            index: index.into(),
            id: document.song_id,
            document,
        }
    }

    /// The document key as sent in `_id`.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}
