//! Talent profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::PublishedContent;
use crate::permission::ResourceScope;

use super::snapshot::TalentSnapshot;

/// A published talent profile in one language.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Talent {
    /// Unique identifier of this language variant.
    pub id: Uuid,
    /// Translation set shared by all language variants of this talent.
    pub translation_set_id: Uuid,
    /// The language of this variant.
    pub language: Language,
    /// Owning agency (translation set id).
    pub agency_id: Uuid,
    /// Groups this talent belongs to (translation set ids).
    pub group_ids: Vec<Uuid>,
    /// Talent name.
    pub name: String,
    /// Profile text.
    pub profile: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Blood type, as commonly listed on idol profiles.
    pub blood_type: Option<String>,
    /// Current content version, shared across the translation set.
    pub version: Version,
    /// When this variant was first published.
    pub created_at: DateTime<Utc>,
    /// When this variant was last modified.
    pub updated_at: DateTime<Utc>,
}

impl PublishedContent for Talent {
    type Snapshot = TalentSnapshot;

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
        &self.name
    }

    fn resource_scope(&self) -> ResourceScope {
        ResourceScope::talent(
            self.agency_id,
            self.group_ids.clone(),
            self.translation_set_id,
        )
    }

    fn apply_snapshot(&mut self, snapshot: &TalentSnapshot) {
        self.group_ids = snapshot.group_ids.clone();
        self.name = snapshot.name.clone();
        self.profile = snapshot.profile.clone();
        self.birth_date = snapshot.birth_date;
        self.blood_type = snapshot.blood_type.clone();
    }

    fn capture_snapshot(&self, at: DateTime<Utc>) -> TalentSnapshot {
        TalentSnapshot {
            id: Uuid::new_v4(),
            talent_id: self.id,
            translation_set_id: self.translation_set_id,
            language: self.language,
            group_ids: self.group_ids.clone(),
            name: self.name.clone(),
            profile: self.profile.clone(),
            birth_date: self.birth_date,
            blood_type: self.blood_type.clone(),
            version: self.version,
            created_at: at,
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
