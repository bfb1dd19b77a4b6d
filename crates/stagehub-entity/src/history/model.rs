//! History record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stagehub_core::AppError;
use stagehub_core::types::Version;

use super::action::HistoryAction;

/// An immutable, append-only record of one change to one content row.
///
/// Exactly one of `published_id` and `draft_id` is set, depending on
/// whether the change touched a live entity or a draft.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryRecord {
    /// Unique history record identifier.
    pub id: Uuid,
    /// The principal who made the change.
    pub editor_id: Uuid,
    /// The principal who submitted the underlying draft, if different.
    pub submitter_id: Option<Uuid>,
    /// The live (published) entity that changed.
    pub published_id: Option<Uuid>,
    /// The draft entity that changed.
    pub draft_id: Option<Uuid>,
    /// Approval status before the change.
    pub from_status: Option<String>,
    /// Approval status after the change.
    pub to_status: Option<String>,
    /// Content version before the change.
    pub from_version: Option<Version>,
    /// Content version after the change.
    pub to_version: Option<Version>,
    /// Human-readable subject label (the entity's display name).
    pub subject: String,
    /// What kind of change this was.
    pub action: HistoryAction,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Data required to append a new history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoryRecord {
    /// The principal who made the change.
    pub editor_id: Uuid,
    /// The principal who submitted the underlying draft, if different.
    pub submitter_id: Option<Uuid>,
    /// The live (published) entity that changed.
    pub published_id: Option<Uuid>,
    /// The draft entity that changed.
    pub draft_id: Option<Uuid>,
    /// Approval status before the change.
    pub from_status: Option<String>,
    /// Approval status after the change.
    pub to_status: Option<String>,
    /// Content version before the change.
    pub from_version: Option<Version>,
    /// Content version after the change.
    pub to_version: Option<Version>,
    /// Human-readable subject label.
    pub subject: String,
    /// What kind of change this was.
    pub action: HistoryAction,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl NewHistoryRecord {
    /// Build a rollback record for one published entity.
    pub fn rollback(
        editor_id: Uuid,
        published_id: Uuid,
        from_version: Version,
        to_version: Version,
        subject: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            editor_id,
            submitter_id: None,
            published_id: Some(published_id),
            draft_id: None,
            from_status: None,
            to_status: None,
            from_version: Some(from_version),
            to_version: Some(to_version),
            subject: subject.into(),
            action: HistoryAction::Rollback,
            recorded_at,
        }
    }

    /// Check the entity-reference invariant: exactly one of `published_id`
    /// and `draft_id` must be set.
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.published_id, self.draft_id) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(AppError::validation(
                "History record must reference exactly one of a published entity or a draft",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_record_references_published_entity() {
        let record = NewHistoryRecord::rollback(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Version::new(5).unwrap(),
            Version::new(6).unwrap(),
            "Old Name",
            Utc::now(),
        );
        assert!(record.validate().is_ok());
        assert!(record.published_id.is_some());
        assert!(record.draft_id.is_none());
        assert_eq!(record.action, HistoryAction::Rollback);
    }

    #[test]
    fn test_validate_rejects_double_reference() {
        let mut record = NewHistoryRecord::rollback(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Version::new(1).unwrap(),
            Version::new(2).unwrap(),
            "x",
            Utc::now(),
        );
        record.draft_id = Some(Uuid::new_v4());
        assert!(record.validate().is_err());

        record.published_id = None;
        record.draft_id = None;
        assert!(record.validate().is_err());
    }
}
