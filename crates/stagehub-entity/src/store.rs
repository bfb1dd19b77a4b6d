//! Storage ports consumed by the service layer.
//!
//! The rollback service is generic over these traits so that each content
//! kind plugs in a small adapter over its concrete repositories, and tests
//! plug in in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use stagehub_core::AppResult;
use stagehub_core::types::Version;

use crate::content::PublishedContent;
use crate::history::NewHistoryRecord;
use crate::principal::Principal;

/// Storage port for one content kind: entity rows plus their snapshots,
/// plus the transactional write path used by rollback.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// The content kind this store manages.
    type Entity: PublishedContent;

    /// Find one language variant by id. Absence is not an error here;
    /// callers decide whether it is.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Self::Entity>>;

    /// Load every language variant sharing a translation set.
    async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Self::Entity>>;

    /// Find the snapshot of one entity at one version.
    async fn find_snapshot(
        &self,
        entity_id: Uuid,
        version: Version,
    ) -> AppResult<Option<<Self::Entity as PublishedContent>::Snapshot>>;

    /// Bulk-load all snapshots of a translation set at one version.
    ///
    /// Implementations must issue a single query, not one lookup per
    /// variant.
    async fn find_snapshots_at(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<<Self::Entity as PublishedContent>::Snapshot>>;

    /// List all snapshots of one entity, newest version first.
    async fn find_snapshots_for_entity(
        &self,
        entity_id: Uuid,
    ) -> AppResult<Vec<<Self::Entity as PublishedContent>::Snapshot>>;

    /// Persist the outcome of one rollback as a single unit of work:
    /// updated entities (guarded by their pre-rollback versions), the
    /// snapshots of their new state, and one history record per entity.
    /// Either everything commits or nothing does.
    async fn persist_rollback(
        &self,
        entities: &[Self::Entity],
        snapshots: &[<Self::Entity as PublishedContent>::Snapshot],
        records: &[NewHistoryRecord],
    ) -> AppResult<()>;
}

/// Lookup port for acting principals.
#[async_trait]
pub trait PrincipalStore: Send + Sync + 'static {
    /// Find a principal by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Principal>>;
}
