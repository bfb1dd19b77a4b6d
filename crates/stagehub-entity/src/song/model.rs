//! Song profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::PublishedContent;
use crate::permission::ResourceScope;

use super::snapshot::SongSnapshot;

/// A published song profile in one language.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Song {
    /// Unique identifier of this language variant.
    pub id: Uuid,
    /// Translation set shared by all language variants of this song.
    pub translation_set_id: Uuid,
    /// The language of this variant.
    pub language: Language,
    /// Owning agency (translation set id).
    pub agency_id: Uuid,
    /// Performing groups (translation set ids).
    pub group_ids: Vec<Uuid>,
    /// Performing talents (translation set ids).
    pub talent_ids: Vec<Uuid>,
    /// Song title.
    pub title: String,
    /// Song description.
    pub description: String,
    /// Release date.
    pub released_on: Option<NaiveDate>,
    /// Music video URL.
    pub music_video_url: Option<String>,
    /// Current content version, shared across the translation set.
    pub version: Version,
    /// When this variant was first published.
    pub created_at: DateTime<Utc>,
    /// When this variant was last modified.
    pub updated_at: DateTime<Utc>,
}

impl PublishedContent for Song {
    type Snapshot = SongSnapshot;

    fn id(&self) -> Uuid {
        self.id
    }

    fn translation_set_id(&self) -> Uuid {
        self.translation_set_id
    }

    fn language(&self) -> Language {
        self.language
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn resource_scope(&self) -> ResourceScope {
        ResourceScope::song(
            self.agency_id,
            self.group_ids.clone(),
            self.talent_ids.clone(),
        )
    }

    fn apply_snapshot(&mut self, snapshot: &SongSnapshot) {
        self.group_ids = snapshot.group_ids.clone();
        self.talent_ids = snapshot.talent_ids.clone();
        self.title = snapshot.title.clone();
        self.description = snapshot.description.clone();
        self.released_on = snapshot.released_on;
        self.music_video_url = snapshot.music_video_url.clone();
    }

    fn capture_snapshot(&self, at: DateTime<Utc>) -> SongSnapshot {
        SongSnapshot {
            id: Uuid::new_v4(),
            song_id: self.id,
            translation_set_id: self.translation_set_id,
            language: self.language,
            group_ids: self.group_ids.clone(),
            talent_ids: self.talent_ids.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            released_on: self.released_on,
            music_video_url: self.music_video_url.clone(),
            version: self.version,
            created_at: at,
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_song() -> Song {
        Song {
            id: Uuid::new_v4(),
            translation_set_id: Uuid::new_v4(),
            language: Language::Ja,
            agency_id: Uuid::new_v4(),
            group_ids: vec![Uuid::new_v4()],
            talent_ids: vec![],
            title: "新曲".to_string(),
            description: "デビューシングル".to_string(),
            released_on: None,
            music_video_url: None,
            version: Version::INITIAL,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_capture_then_apply_restores_fields() {
        let mut song = sample_song();
        let snapshot = song.capture_snapshot(Utc::now());

        song.title = "改題".to_string();
        song.description = "書き直し".to_string();
        song.apply_snapshot(&snapshot);

        assert_eq!(song.title, "新曲");
        assert_eq!(song.description, "デビューシングル");
        // Identity and version are not part of the field set.
        assert_eq!(song.version, Version::INITIAL);
    }

    #[test]
    fn test_snapshot_carries_entity_identity() {
        use crate::content::ContentSnapshot;

        let song = sample_song();
        let snapshot = song.capture_snapshot(Utc::now());
        assert_eq!(snapshot.entity_id(), song.id);
        assert_eq!(ContentSnapshot::version(&snapshot), song.version);
    }
}
