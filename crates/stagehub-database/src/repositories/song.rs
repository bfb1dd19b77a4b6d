//! Song repository implementations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::song::{Song, SongSnapshot};

/// Repository for published song variants.
#[derive(Debug, Clone)]
pub struct SongRepository {
    pool: PgPool,
}

impl SongRepository {
    /// Create a new song repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a song variant by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Song>> {
        sqlx::query_as::<_, Song>("SELECT * FROM songs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find song", e))
    }

    /// Load every language variant of one song.
    pub async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Song>> {
        sqlx::query_as::<_, Song>(
            "SELECT * FROM songs WHERE translation_set_id = $1 ORDER BY language",
        )
        .bind(set_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load song variants", e))
    }

    /// Upsert a song variant. Does not create a snapshot; the service
    /// layer controls when snapshots are taken.
    pub async fn save(&self, song: &Song) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO songs \
                 (id, translation_set_id, language, agency_id, group_ids, talent_ids, title, \
                  description, released_on, music_video_url, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (id) DO UPDATE SET \
                 agency_id = EXCLUDED.agency_id, \
                 group_ids = EXCLUDED.group_ids, \
                 talent_ids = EXCLUDED.talent_ids, \
                 title = EXCLUDED.title, \
                 description = EXCLUDED.description, \
                 released_on = EXCLUDED.released_on, \
                 music_video_url = EXCLUDED.music_video_url, \
                 version = EXCLUDED.version, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(song.id)
        .bind(song.translation_set_id)
        .bind(song.language)
        .bind(song.agency_id)
        .bind(&song.group_ids)
        .bind(&song.talent_ids)
        .bind(&song.title)
        .bind(&song.description)
        .bind(song.released_on)
        .bind(&song.music_video_url)
        .bind(song.version)
        .bind(song.created_at)
        .bind(song.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save song", e))?;
        Ok(())
    }

    /// Update a song variant inside a transaction, guarded by its
    /// pre-update version.
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        song: &Song,
        expected_version: Version,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE songs SET \
                 group_ids = $1, talent_ids = $2, title = $3, description = $4, \
                 released_on = $5, music_video_url = $6, version = $7, updated_at = $8 \
             WHERE id = $9 AND version = $10",
        )
        .bind(&song.group_ids)
        .bind(&song.talent_ids)
        .bind(&song.title)
        .bind(&song.description)
        .bind(song.released_on)
        .bind(&song.music_video_url)
        .bind(song.version)
        .bind(song.updated_at)
        .bind(song.id)
        .bind(expected_version)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update song", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Song {} was modified concurrently (expected version {expected_version})",
                song.id
            )));
        }
        Ok(())
    }
}

/// Repository for song snapshots. Append-only.
#[derive(Debug, Clone)]
pub struct SongSnapshotRepository {
    pool: PgPool,
}

impl SongSnapshotRepository {
    /// Create a new song snapshot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a snapshot. A (song id, version) pair can only ever be
    /// written once; a duplicate surfaces as a conflict.
    pub async fn create(&self, snapshot: &SongSnapshot) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.song_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.group_ids)
            .bind(&snapshot.talent_ids)
            .bind(&snapshot.title)
            .bind(&snapshot.description)
            .bind(snapshot.released_on)
            .bind(&snapshot.music_video_url)
            .bind(snapshot.version)
            .bind(snapshot.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(snapshot, e))?;
        Ok(())
    }

    /// Append a snapshot inside an existing transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        snapshot: &SongSnapshot,
    ) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.song_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.group_ids)
            .bind(&snapshot.talent_ids)
            .bind(&snapshot.title)
            .bind(&snapshot.description)
            .bind(snapshot.released_on)
            .bind(&snapshot.music_video_url)
            .bind(snapshot.version)
            .bind(snapshot.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_insert_error(snapshot, e))?;
        Ok(())
    }

    /// Find the snapshot of one song variant at one version.
    pub async fn find_by_entity_and_version(
        &self,
        song_id: Uuid,
        version: Version,
    ) -> AppResult<Option<SongSnapshot>> {
        sqlx::query_as::<_, SongSnapshot>(
            "SELECT * FROM song_snapshots WHERE song_id = $1 AND version = $2",
        )
        .bind(song_id)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find song snapshot", e))
    }

    /// Bulk-load all snapshots of a translation set at one version with a
    /// single query.
    pub async fn find_by_translation_set_and_version(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<SongSnapshot>> {
        sqlx::query_as::<_, SongSnapshot>(
            "SELECT * FROM song_snapshots WHERE translation_set_id = $1 AND version = $2",
        )
        .bind(set_id)
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load song snapshots", e)
        })
    }

    /// List all snapshots of one song variant, newest version first.
    pub async fn find_by_entity(&self, song_id: Uuid) -> AppResult<Vec<SongSnapshot>> {
        sqlx::query_as::<_, SongSnapshot>(
            "SELECT * FROM song_snapshots WHERE song_id = $1 ORDER BY version DESC",
        )
        .bind(song_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list song snapshots", e)
        })
    }
}

/// Insert statement shared by the pooled and transactional paths.
const INSERT_SNAPSHOT_SQL: &str = "INSERT INTO song_snapshots \
         (id, song_id, translation_set_id, language, group_ids, talent_ids, title, \
          description, released_on, music_video_url, version, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)";

fn map_insert_error(snapshot: &SongSnapshot, e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::conflict(format!(
            "Snapshot already exists for song {} at version {}",
            snapshot.song_id, snapshot.version
        ))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to create song snapshot", e)
    }
}
