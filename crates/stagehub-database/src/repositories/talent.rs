//! Talent repository implementations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::talent::{Talent, TalentSnapshot};

/// Repository for published talent variants.
#[derive(Debug, Clone)]
pub struct TalentRepository {
    pool: PgPool,
}

impl TalentRepository {
    /// Create a new talent repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a talent variant by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Talent>> {
        sqlx::query_as::<_, Talent>("SELECT * FROM talents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find talent", e))
    }

    /// Load every language variant of one talent.
    pub async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Talent>> {
        sqlx::query_as::<_, Talent>(
            "SELECT * FROM talents WHERE translation_set_id = $1 ORDER BY language",
        )
        .bind(set_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load talent variants", e)
        })
    }

    /// Upsert a talent variant. Does not create a snapshot; the service
    /// layer controls when snapshots are taken.
    pub async fn save(&self, talent: &Talent) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO talents \
                 (id, translation_set_id, language, agency_id, group_ids, name, profile, \
                  birth_date, blood_type, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (id) DO UPDATE SET \
                 agency_id = EXCLUDED.agency_id, \
                 group_ids = EXCLUDED.group_ids, \
                 name = EXCLUDED.name, \
                 profile = EXCLUDED.profile, \
                 birth_date = EXCLUDED.birth_date, \
                 blood_type = EXCLUDED.blood_type, \
                 version = EXCLUDED.version, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(talent.id)
        .bind(talent.translation_set_id)
        .bind(talent.language)
        .bind(talent.agency_id)
        .bind(&talent.group_ids)
        .bind(&talent.name)
        .bind(&talent.profile)
        .bind(talent.birth_date)
        .bind(&talent.blood_type)
        .bind(talent.version)
        .bind(talent.created_at)
        .bind(talent.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save talent", e))?;
        Ok(())
    }

    /// Update a talent variant inside a transaction, guarded by its
    /// pre-update version.
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        talent: &Talent,
        expected_version: Version,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE talents SET \
                 group_ids = $1, name = $2, profile = $3, birth_date = $4, blood_type = $5, \
                 version = $6, updated_at = $7 \
             WHERE id = $8 AND version = $9",
        )
        .bind(&talent.group_ids)
        .bind(&talent.name)
        .bind(&talent.profile)
        .bind(talent.birth_date)
        .bind(&talent.blood_type)
        .bind(talent.version)
        .bind(talent.updated_at)
        .bind(talent.id)
        .bind(expected_version)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update talent", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Talent {} was modified concurrently (expected version {expected_version})",
                talent.id
            )));
        }
        Ok(())
    }
}

/// Repository for talent snapshots. Append-only.
#[derive(Debug, Clone)]
pub struct TalentSnapshotRepository {
    pool: PgPool,
}

impl TalentSnapshotRepository {
    /// Create a new talent snapshot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a snapshot. A (talent id, version) pair can only ever be
    /// written once; a duplicate surfaces as a conflict.
    pub async fn create(&self, snapshot: &TalentSnapshot) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.talent_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.group_ids)
            .bind(&snapshot.name)
            .bind(&snapshot.profile)
            .bind(snapshot.birth_date)
            .bind(&snapshot.blood_type)
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
        snapshot: &TalentSnapshot,
    ) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.talent_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.group_ids)
            .bind(&snapshot.name)
            .bind(&snapshot.profile)
            .bind(snapshot.birth_date)
            .bind(&snapshot.blood_type)
            .bind(snapshot.version)
            .bind(snapshot.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_insert_error(snapshot, e))?;
        Ok(())
    }

    /// Find the snapshot of one talent variant at one version.
    pub async fn find_by_entity_and_version(
        &self,
        talent_id: Uuid,
        version: Version,
    ) -> AppResult<Option<TalentSnapshot>> {
        sqlx::query_as::<_, TalentSnapshot>(
            "SELECT * FROM talent_snapshots WHERE talent_id = $1 AND version = $2",
        )
        .bind(talent_id)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find talent snapshot", e)
        })
    }

    /// Bulk-load all snapshots of a translation set at one version with a
    /// single query.
    pub async fn find_by_translation_set_and_version(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<TalentSnapshot>> {
        sqlx::query_as::<_, TalentSnapshot>(
            "SELECT * FROM talent_snapshots WHERE translation_set_id = $1 AND version = $2",
        )
        .bind(set_id)
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load talent snapshots", e)
        })
    }

    /// List all snapshots of one talent variant, newest version first.
    pub async fn find_by_entity(&self, talent_id: Uuid) -> AppResult<Vec<TalentSnapshot>> {
        sqlx::query_as::<_, TalentSnapshot>(
            "SELECT * FROM talent_snapshots WHERE talent_id = $1 ORDER BY version DESC",
        )
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list talent snapshots", e)
        })
    }
}

/// Insert statement shared by the pooled and transactional paths.
const INSERT_SNAPSHOT_SQL: &str = "INSERT INTO talent_snapshots \
         (id, talent_id, translation_set_id, language, group_ids, name, profile, \
          birth_date, blood_type, version, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)";

fn map_insert_error(snapshot: &TalentSnapshot, e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::conflict(format!(
            "Snapshot already exists for talent {} at version {}",
            snapshot.talent_id, snapshot.version
        ))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to create talent snapshot", e)
    }
}
