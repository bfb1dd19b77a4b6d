//! Rollback service — restore a translation set to an earlier snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use stagehub_auth::policy::PolicyEvaluator;
use stagehub_core::AppResult;
use stagehub_core::clock::Clock;
use stagehub_core::types::Version;
use stagehub_entity::content::{ContentSnapshot, PublishedContent};
use stagehub_entity::history::NewHistoryRecord;
use stagehub_entity::permission::Action;
use stagehub_entity::store::{ContentStore, PrincipalStore};

use crate::context::RequestContext;

use super::error::RollbackError;

/// Restores published content to the state captured at an earlier version.
///
/// Rollback is lock-step across a translation set: when one language
/// variant is rolled back, every sibling variant is restored to the same
/// target version in the same transaction, and each receives a fresh
/// version number one above the shared current version. The restored state
/// is itself snapshotted, so a rollback can be rolled back.
///
/// Generic over the content store so the same algorithm serves agencies,
/// groups, talents, and songs.
pub struct RollbackService<S: ContentStore> {
    /// Entity, snapshot, and history storage for one content kind.
    store: Arc<S>,
    /// Principal lookup.
    principals: Arc<dyn PrincipalStore>,
    /// Authorization policy.
    policy: Arc<dyn PolicyEvaluator>,
    /// Timestamp source.
    clock: Arc<dyn Clock>,
}

impl<S: ContentStore> RollbackService<S> {
    /// Creates a new rollback service.
    pub fn new(
        store: Arc<S>,
        principals: Arc<dyn PrincipalStore>,
        policy: Arc<dyn PolicyEvaluator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            principals,
            policy,
            clock,
        }
    }

    /// Rolls the translation set containing `entity_id` back to `target`.
    ///
    /// Validates everything up front and performs no writes unless every
    /// language variant can be restored. On success, returns the updated
    /// variants, each carrying the content of its `target` snapshot under
    /// a new version number.
    pub async fn rollback(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
        target: Version,
    ) -> AppResult<Vec<S::Entity>> {
        let entity = self
            .store
            .find_by_id(entity_id)
            .await?
            .ok_or(RollbackError::EntityNotFound { entity_id })?;

        let principal = self
            .principals
            .find_by_id(ctx.principal_id)
            .await?
            .ok_or(RollbackError::PrincipalNotFound {
                principal_id: ctx.principal_id,
            })?;

        if !self
            .policy
            .evaluate(&principal, Action::Rollback, &entity.resource_scope())
        {
            warn!(
                principal_id = %principal.id,
                entity_id = %entity_id,
                "Rollback refused by policy"
            );
            return Err(RollbackError::Disallowed {
                principal_id: principal.id,
                action: Action::Rollback,
            }
            .into());
        }

        let current = entity.version();
        if target >= current {
            return Err(RollbackError::InvalidRollbackTarget { target, current }.into());
        }

        let set_id = entity.translation_set_id();
        let mut variants = self.store.find_by_translation_set(set_id).await?;

        // Lock-step invariant: every sibling must sit on the same version,
        // otherwise the set has drifted and no shared target is safe.
        if variants.iter().any(|v| v.version() != current) {
            return Err(RollbackError::VersionMismatch { set_id }.into());
        }

        let snapshots = self.store.find_snapshots_at(set_id, target).await?;
        let by_entity: HashMap<Uuid, _> = snapshots
            .into_iter()
            .map(|snap| (snap.entity_id(), snap))
            .collect();

        let now = self.clock.now();
        let next = current.next();
        let mut new_snapshots = Vec::with_capacity(variants.len());
        let mut records = Vec::with_capacity(variants.len());

        for variant in &mut variants {
            let snapshot =
                by_entity
                    .get(&variant.id())
                    .ok_or(RollbackError::SnapshotNotFound {
                        entity_id: variant.id(),
                        version: target,
                    })?;

            variant.apply_snapshot(snapshot);
            variant.set_version(next);
            variant.touch(now);

            new_snapshots.push(variant.capture_snapshot(now));
            records.push(NewHistoryRecord::rollback(
                principal.id,
                variant.id(),
                current,
                next,
                variant.display_name(),
                now,
            ));
        }

        self.store
            .persist_rollback(&variants, &new_snapshots, &records)
            .await?;

        info!(
            principal_id = %principal.id,
            entity_id = %entity_id,
            translation_set_id = %set_id,
            target_version = %target,
            new_version = %next,
            variants = variants.len(),
            "Rolled translation set back"
        );

        Ok(variants)
    }

    /// Lists the snapshots of one entity, newest version first.
    ///
    /// Requires `View` on the entity's resource; any role can hold that.
    pub async fn versions(
        &self,
        ctx: &RequestContext,
        entity_id: Uuid,
    ) -> AppResult<Vec<<S::Entity as PublishedContent>::Snapshot>> {
        let entity = self
            .store
            .find_by_id(entity_id)
            .await?
            .ok_or(RollbackError::EntityNotFound { entity_id })?;

        let principal = self
            .principals
            .find_by_id(ctx.principal_id)
            .await?
            .ok_or(RollbackError::PrincipalNotFound {
                principal_id: ctx.principal_id,
            })?;

        if !self
            .policy
            .evaluate(&principal, Action::View, &entity.resource_scope())
        {
            return Err(RollbackError::Disallowed {
                principal_id: principal.id,
                action: Action::View,
            }
            .into());
        }

        self.store.find_snapshots_for_entity(entity_id).await
    }
}
