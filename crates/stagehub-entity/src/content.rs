//! Traits capturing the common shape of published, versioned content.
//!
//! The rollback algorithm is identical for every content kind; only the
//! field set differs. These traits let the service layer implement the
//! algorithm once, parameterized over the entity shape.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use stagehub_core::types::{Language, Version};

use crate::permission::ResourceScope;

/// A published, versioned, per-language content row.
pub trait PublishedContent: Clone + Send + Sync + 'static {
    /// The immutable snapshot type capturing this entity's field set.
    type Snapshot: ContentSnapshot;

    /// The entity's own id (one per language variant).
    fn id(&self) -> Uuid;

    /// The translation set grouping all language variants of this item.
    fn translation_set_id(&self) -> Uuid;

    /// The language of this variant.
    fn language(&self) -> Language;

    /// The current version. All variants of a translation set share this
    /// value at rest.
    fn version(&self) -> Version;

    /// Set the version. Only the service layer advances versions, and only
    /// ever by one.
    fn set_version(&mut self, version: Version);

    /// Human-readable name used as the history subject.
    fn display_name(&self) -> &str;

    /// Build the resource descriptor the policy evaluator scopes against.
    fn resource_scope(&self) -> ResourceScope;

    /// Overwrite this entity's field set with the values captured in
    /// `snapshot`. Identity columns (id, translation set, language) and the
    /// version are left untouched.
    fn apply_snapshot(&mut self, snapshot: &Self::Snapshot);

    /// Capture the entity's current field set and version as a new
    /// immutable snapshot created at `at`.
    fn capture_snapshot(&self, at: DateTime<Utc>) -> Self::Snapshot;

    /// Record `at` as the entity's last modification time.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// An immutable capture of one entity's field set at one version.
pub trait ContentSnapshot: Clone + Send + Sync + 'static {
    /// The entity this snapshot belongs to.
    fn entity_id(&self) -> Uuid;

    /// The version this snapshot represents.
    fn version(&self) -> Version;

    /// Human-readable name captured in this snapshot.
    fn display_name(&self) -> &str;

    /// When the snapshot was taken.
    fn created_at(&self) -> DateTime<Utc>;
}
