//! Group profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::PublishedContent;
use crate::permission::ResourceScope;

use super::snapshot::GroupSnapshot;

/// A published group profile in one language.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique identifier of this language variant.
    pub id: Uuid,
    /// Translation set shared by all language variants of this group.
    pub translation_set_id: Uuid,
    /// The language of this variant.
    pub language: Language,
    /// Owning agency (translation set id).
    pub agency_id: Uuid,
    /// Group name.
    pub name: String,
    /// Group description.
    pub description: String,
    /// Debut date.
    pub debut_on: Option<NaiveDate>,
    /// Official fanclub URL.
    pub fanclub_url: Option<String>,
    /// Current content version, shared across the translation set.
    pub version: Version,
    /// When this variant was first published.
    pub created_at: DateTime<Utc>,
    /// When this variant was last modified.
    pub updated_at: DateTime<Utc>,
}

impl PublishedContent for Group {
    type Snapshot = GroupSnapshot;

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
        ResourceScope::group(self.agency_id, self.translation_set_id)
    }

    fn apply_snapshot(&mut self, snapshot: &GroupSnapshot) {
        self.name = snapshot.name.clone();
        self.description = snapshot.description.clone();
        self.debut_on = snapshot.debut_on;
        self.fanclub_url = snapshot.fanclub_url.clone();
    }

    fn capture_snapshot(&self, at: DateTime<Utc>) -> GroupSnapshot {
        GroupSnapshot {
            id: Uuid::new_v4(),
            group_id: self.id,
            translation_set_id: self.translation_set_id,
            language: self.language,
            name: self.name.clone(),
            description: self.description.clone(),
            debut_on: self.debut_on,
            fanclub_url: self.fanclub_url.clone(),
            version: self.version,
            created_at: at,
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
