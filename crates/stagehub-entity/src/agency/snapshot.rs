//! Agency snapshot entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::content::ContentSnapshot;

/// An immutable capture of an agency variant's field set at one version.
///
/// Exactly one snapshot exists per (agency id, version) pair once that
/// version has been reached; snapshots are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgencySnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// The agency variant this snapshot belongs to.
    pub agency_id: Uuid,
    /// Translation set of the owning agency.
    pub translation_set_id: Uuid,
    /// Language of the owning variant.
    pub language: Language,
    /// Captured agency name.
    pub name: String,
    /// Captured description.
    pub description: String,
    /// Captured founding date.
    pub founded_on: Option<NaiveDate>,
    /// Captured website URL.
    pub website_url: Option<String>,
    /// The version this snapshot represents.
    pub version: Version,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

impl ContentSnapshot for AgencySnapshot {
    fn entity_id(&self) -> Uuid {
        self.agency_id
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
