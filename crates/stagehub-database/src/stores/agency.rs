//! Content store adapter for agencies.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::agency::{Agency, AgencySnapshot};
use stagehub_entity::content::PublishedContent;
use stagehub_entity::history::NewHistoryRecord;
use stagehub_entity::store::ContentStore;

use crate::repositories::{AgencyRepository, AgencySnapshotRepository, HistoryRepository};

/// Implements the content store port for agencies over PostgreSQL.
#[derive(Debug, Clone)]
pub struct AgencyStore {
    pool: PgPool,
    agencies: AgencyRepository,
    snapshots: AgencySnapshotRepository,
    history: HistoryRepository,
}

impl AgencyStore {
    /// Create a new agency store.
    pub fn new(pool: PgPool) -> Self {
        Self {
            agencies: AgencyRepository::new(pool.clone()),
            snapshots: AgencySnapshotRepository::new(pool.clone()),
            history: HistoryRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ContentStore for AgencyStore {
    type Entity = Agency;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Agency>> {
        self.agencies.find_by_id(id).await
    }

    async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Agency>> {
        self.agencies.find_by_translation_set(set_id).await
    }

    async fn find_snapshot(
        &self,
        entity_id: Uuid,
        version: Version,
    ) -> AppResult<Option<AgencySnapshot>> {
        self.snapshots
            .find_by_entity_and_version(entity_id, version)
            .await
    }

    async fn find_snapshots_at(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<AgencySnapshot>> {
        self.snapshots
            .find_by_translation_set_and_version(set_id, version)
            .await
    }

    async fn find_snapshots_for_entity(&self, entity_id: Uuid) -> AppResult<Vec<AgencySnapshot>> {
        self.snapshots.find_by_entity(entity_id).await
    }

    async fn persist_rollback(
        &self,
        entities: &[Agency],
        snapshots: &[AgencySnapshot],
        records: &[NewHistoryRecord],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for entity in entities {
            let expected = Version::new(entity.version().value() - 1)?;
            self.agencies.update_in_tx(&mut tx, entity, expected).await?;
        }
        for snapshot in snapshots {
            self.snapshots.create_in_tx(&mut tx, snapshot).await?;
        }
        for record in records {
            self.history.create_in_tx(&mut tx, record).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rollback", e)
        })
    }
}
