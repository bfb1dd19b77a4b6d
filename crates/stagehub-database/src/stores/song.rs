//! Content store adapter for songs.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::content::PublishedContent;
use stagehub_entity::history::NewHistoryRecord;
use stagehub_entity::song::{Song, SongSnapshot};
use stagehub_entity::store::ContentStore;

use crate::repositories::{HistoryRepository, SongRepository, SongSnapshotRepository};

/// Implements the content store port for songs over PostgreSQL.
#[derive(Debug, Clone)]
pub struct SongStore {
    pool: PgPool,
    songs: SongRepository,
    snapshots: SongSnapshotRepository,
    history: HistoryRepository,
}

impl SongStore {
    /// Create a new song store.
    pub fn new(pool: PgPool) -> Self {
        Self {
            songs: SongRepository::new(pool.clone()),
            snapshots: SongSnapshotRepository::new(pool.clone()),
            history: HistoryRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ContentStore for SongStore {
    type Entity = Song;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Song>> {
        self.songs.find_by_id(id).await
    }

    async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Song>> {
        self.songs.find_by_translation_set(set_id).await
    }

    async fn find_snapshot(
        &self,
        entity_id: Uuid,
        version: Version,
    ) -> AppResult<Option<SongSnapshot>> {
        self.snapshots
            .find_by_entity_and_version(entity_id, version)
            .await
    }

    async fn find_snapshots_at(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<SongSnapshot>> {
        self.snapshots
            .find_by_translation_set_and_version(set_id, version)
            .await
    }

    async fn find_snapshots_for_entity(&self, entity_id: Uuid) -> AppResult<Vec<SongSnapshot>> {
        self.snapshots.find_by_entity(entity_id).await
    }

    async fn persist_rollback(
        &self,
        entities: &[Song],
        snapshots: &[SongSnapshot],
        records: &[NewHistoryRecord],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for entity in entities {
            let expected = Version::new(entity.version().value() - 1)?;
            self.songs.update_in_tx(&mut tx, entity, expected).await?;
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
