//! Rollback failure cases.

use thiserror::Error;
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::types::Version;
use stagehub_entity::permission::Action;

/// Everything that can make a rollback request fail before any write
/// happens. Each case maps onto one [`ErrorKind`], so callers can translate
/// them into transport-level responses without inspecting messages.
#[derive(Debug, Clone, Error)]
pub enum RollbackError {
    /// The requested entity does not exist.
    #[error("Entity {entity_id} not found")]
    EntityNotFound {
        /// The missing entity's id.
        entity_id: Uuid,
    },

    /// The acting principal does not exist.
    #[error("Principal {principal_id} not found")]
    PrincipalNotFound {
        /// The missing principal's id.
        principal_id: Uuid,
    },

    /// A language variant has no snapshot at the target version.
    #[error("No snapshot of entity {entity_id} at version {version}")]
    SnapshotNotFound {
        /// The variant missing a snapshot.
        entity_id: Uuid,
        /// The requested target version.
        version: Version,
    },

    /// The principal is not allowed to perform the requested action on
    /// this resource.
    #[error("Principal {principal_id} is not permitted to {action} this resource")]
    Disallowed {
        /// The denied principal's id.
        principal_id: Uuid,
        /// The denied action.
        action: Action,
    },

    /// The target version is not strictly earlier than the current one.
    #[error("Rollback target {target} must be earlier than current version {current}")]
    InvalidRollbackTarget {
        /// The requested target version.
        target: Version,
        /// The entity's current version.
        current: Version,
    },

    /// The language variants of the translation set are not all on the
    /// same version, so a lock-step rollback is impossible.
    #[error("Translation set {set_id} variants have diverging versions")]
    VersionMismatch {
        /// The affected translation set.
        set_id: Uuid,
    },
}

impl From<RollbackError> for AppError {
    fn from(err: RollbackError) -> Self {
        let kind = match &err {
            RollbackError::EntityNotFound { .. }
            | RollbackError::PrincipalNotFound { .. }
            | RollbackError::SnapshotNotFound { .. } => ErrorKind::NotFound,
            RollbackError::Disallowed { .. } => ErrorKind::Authorization,
            RollbackError::InvalidRollbackTarget { .. } => ErrorKind::Validation,
            RollbackError::VersionMismatch { .. } => ErrorKind::Conflict,
        };
        AppError::new(kind, err.to_string())
    }
}
