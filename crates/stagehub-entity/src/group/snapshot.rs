//! Group snapshot entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::ContentSnapshot;

/// An immutable capture of a group variant's field set at one version.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupSnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// The group variant this snapshot belongs to.
    pub group_id: Uuid,
    /// Translation set of the owning group.
    pub translation_set_id: Uuid,
    /// Language of the owning variant.
    pub language: Language,
    /// Captured group name.
    pub name: String,
    /// Captured description.
    pub description: String,
    /// Captured debut date.
    pub debut_on: Option<NaiveDate>,
    /// Captured fanclub URL.
    pub fanclub_url: Option<String>,
    /// The version this snapshot represents.
    pub version: Version,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

impl ContentSnapshot for GroupSnapshot {
    fn entity_id(&self) -> Uuid {
        self.group_id
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
