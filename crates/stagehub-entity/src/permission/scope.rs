//! Resource descriptors handed to the policy evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of content a resource descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A talent agency profile.
    Agency,
    /// An idol/artist group profile.
    Group,
    /// An individual talent profile.
    Talent,
    /// A song profile.
    Song,
}

impl ContentKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Group => "group",
            Self::Talent => "talent",
            Self::Song => "song",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes the resource an action is requested against.
///
/// Carries the content kind plus the owning agency/group/talent translation
/// set ids so the policy evaluator can apply scoped rules (e.g. an
/// agency-scoped principal may only act on resources of its own agency).
/// Built from an entity via
/// [`PublishedContent::resource_scope`](crate::content::PublishedContent::resource_scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceScope {
    /// The content kind.
    pub kind: ContentKind,
    /// Owning agency (translation set id), if any.
    pub agency_id: Option<Uuid>,
    /// Owning groups (translation set ids).
    pub group_ids: Vec<Uuid>,
    /// Owning talents (translation set ids).
    pub talent_ids: Vec<Uuid>,
}

impl ResourceScope {
    /// Scope for an agency profile itself.
    pub fn agency(agency_id: Uuid) -> Self {
        Self {
            kind: ContentKind::Agency,
            agency_id: Some(agency_id),
            group_ids: Vec::new(),
            talent_ids: Vec::new(),
        }
    }

    /// Scope for a group profile.
    pub fn group(agency_id: Uuid, group_id: Uuid) -> Self {
        Self {
            kind: ContentKind::Group,
            agency_id: Some(agency_id),
            group_ids: vec![group_id],
            talent_ids: Vec::new(),
        }
    }

    /// Scope for a talent profile.
    pub fn talent(agency_id: Uuid, group_ids: Vec<Uuid>, talent_id: Uuid) -> Self {
        Self {
            kind: ContentKind::Talent,
            agency_id: Some(agency_id),
            group_ids,
            talent_ids: vec![talent_id],
        }
    }

    /// Scope for a song profile.
    pub fn song(agency_id: Uuid, group_ids: Vec<Uuid>, talent_ids: Vec<Uuid>) -> Self {
        Self {
            kind: ContentKind::Song,
            agency_id: Some(agency_id),
            group_ids,
            talent_ids,
        }
    }
}
