//! Talent snapshot entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::ContentSnapshot;

/// An immutable capture of a talent variant's field set at one version.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TalentSnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// The talent variant this snapshot belongs to.
    pub talent_id: Uuid,
    /// Translation set of the owning talent.
    pub translation_set_id: Uuid,
    /// Language of the owning variant.
    pub language: Language,
    /// Captured group memberships (translation set ids).
    pub group_ids: Vec<Uuid>,
    /// Captured talent name.
    pub name: String,
    /// Captured profile text.
    pub profile: String,
    /// Captured date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Captured blood type.
    pub blood_type: Option<String>,
    /// The version this snapshot represents.
    pub version: Version,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

impl ContentSnapshot for TalentSnapshot {
    fn entity_id(&self) -> Uuid {
        self.talent_id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
