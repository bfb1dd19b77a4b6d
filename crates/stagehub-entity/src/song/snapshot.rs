//! Song snapshot entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::ContentSnapshot;

/// An immutable capture of a song variant's field set at one version.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SongSnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// The song variant this snapshot belongs to.
    pub song_id: Uuid,
    /// Translation set of the owning song.
    pub translation_set_id: Uuid,
    /// Language of the owning variant.
    pub language: Language,
    /// Captured performing groups (translation set ids).
    pub group_ids: Vec<Uuid>,
    /// Captured performing talents (translation set ids).
    pub talent_ids: Vec<Uuid>,
    /// Captured song title.
    pub title: String,
    /// Captured description.
    pub description: String,
    /// Captured release date.
    pub released_on: Option<NaiveDate>,
    /// Captured music video URL.
    pub music_video_url: Option<String>,
    /// The version this snapshot represents.
    pub version: Version,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

impl ContentSnapshot for SongSnapshot {
    fn entity_id(&self) -> Uuid {
        self.song_id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
