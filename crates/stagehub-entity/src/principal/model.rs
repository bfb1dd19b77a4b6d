//! Principal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::PrincipalRole;

/// A principal that can act on published content.
///
/// The scoping columns carry translation set ids, matching the reference
/// convention used by content entities.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Principal {
    /// Unique principal identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The principal's role.
    pub role: PrincipalRole,
    /// The agency this principal belongs to, if agency-scoped.
    pub agency_id: Option<Uuid>,
    /// Groups this principal manages, if group-scoped.
    pub group_ids: Vec<Uuid>,
    /// Talents this principal manages, if talent-scoped.
    pub talent_ids: Vec<Uuid>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
}
