//! Agency profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::PublishedContent;
use crate::permission::ResourceScope;

use super::snapshot::AgencySnapshot;

/// A published agency profile in one language.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agency {
    /// Unique identifier of this language variant.
    pub id: Uuid,
    /// Translation set shared by all language variants of this agency.
    pub translation_set_id: Uuid,
    /// The language of this variant.
    pub language: Language,
    /// Agency name.
    pub name: String,
    /// Agency description.
    pub description: String,
    /// Founding date.
    pub founded_on: Option<NaiveDate>,
    /// Official website URL.
    pub website_url: Option<String>,
    /// Current content version, shared across the translation set.
    pub version: Version,
    /// When this variant was first published.
    pub created_at: DateTime<Utc>,
    /// When this variant was last modified.
    pub updated_at: DateTime<Utc>,
}

impl PublishedContent for Agency {
    type Snapshot = AgencySnapshot;

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
        ResourceScope::agency(self.translation_set_id)
    }

    fn apply_snapshot(&mut self, snapshot: &AgencySnapshot) {
        self.name = snapshot.name.clone();
        self.description = snapshot.description.clone();
        self.founded_on = snapshot.founded_on;
        self.website_url = snapshot.website_url.clone();
    }

    fn capture_snapshot(&self, at: DateTime<Utc>) -> AgencySnapshot {
        AgencySnapshot {
            id: Uuid::new_v4(),
            agency_id: self.id,
            translation_set_id: self.translation_set_id,
            language: self.language,
            name: self.name.clone(),
            description: self.description.clone(),
            founded_on: self.founded_on,
            website_url: self.website_url.clone(),
            version: self.version,
            created_at: at,
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
