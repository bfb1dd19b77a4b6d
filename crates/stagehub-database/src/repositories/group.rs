//! Group repository implementations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::group::{Group, GroupSnapshot};

/// Repository for published group variants.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group variant by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// Load every language variant of one group.
    pub async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT * FROM groups WHERE translation_set_id = $1 ORDER BY language",
        )
        .bind(set_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load group variants", e)
        })
    }

    /// Upsert a group variant. Does not create a snapshot; the service
    /// layer controls when snapshots are taken.
    pub async fn save(&self, group: &Group) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO groups \
                 (id, translation_set_id, language, agency_id, name, description, debut_on, \
                  fanclub_url, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (id) DO UPDATE SET \
                 agency_id = EXCLUDED.agency_id, \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 debut_on = EXCLUDED.debut_on, \
                 fanclub_url = EXCLUDED.fanclub_url, \
                 version = EXCLUDED.version, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(group.id)
        .bind(group.translation_set_id)
        .bind(group.language)
        .bind(group.agency_id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.debut_on)
        .bind(&group.fanclub_url)
        .bind(group.version)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save group", e))?;
        Ok(())
    }

    /// Update a group variant inside a transaction, guarded by its
    /// pre-update version.
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: &Group,
        expected_version: Version,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE groups SET \
                 name = $1, description = $2, debut_on = $3, fanclub_url = $4, \
                 version = $5, updated_at = $6 \
             WHERE id = $7 AND version = $8",
        )
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.debut_on)
        .bind(&group.fanclub_url)
        .bind(group.version)
        .bind(group.updated_at)
        .bind(group.id)
        .bind(expected_version)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update group", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Group {} was modified concurrently (expected version {expected_version})",
                group.id
            )));
        }
        Ok(())
    }
}

/// Repository for group snapshots. Append-only.
#[derive(Debug, Clone)]
pub struct GroupSnapshotRepository {
    pool: PgPool,
}

impl GroupSnapshotRepository {
    /// Create a new group snapshot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a snapshot. A (group id, version) pair can only ever be
    /// written once; a duplicate surfaces as a conflict.
    pub async fn create(&self, snapshot: &GroupSnapshot) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.group_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.name)
            .bind(&snapshot.description)
            .bind(snapshot.debut_on)
            .bind(&snapshot.fanclub_url)
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
        snapshot: &GroupSnapshot,
    ) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.group_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.name)
            .bind(&snapshot.description)
            .bind(snapshot.debut_on)
            .bind(&snapshot.fanclub_url)
            .bind(snapshot.version)
            .bind(snapshot.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_insert_error(snapshot, e))?;
        Ok(())
    }

    /// Find the snapshot of one group variant at one version.
    pub async fn find_by_entity_and_version(
        &self,
        group_id: Uuid,
        version: Version,
    ) -> AppResult<Option<GroupSnapshot>> {
        sqlx::query_as::<_, GroupSnapshot>(
            "SELECT * FROM group_snapshots WHERE group_id = $1 AND version = $2",
        )
        .bind(group_id)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find group snapshot", e)
        })
    }

    /// Bulk-load all snapshots of a translation set at one version with a
    /// single query.
    pub async fn find_by_translation_set_and_version(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<GroupSnapshot>> {
        sqlx::query_as::<_, GroupSnapshot>(
            "SELECT * FROM group_snapshots WHERE translation_set_id = $1 AND version = $2",
        )
        .bind(set_id)
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load group snapshots", e)
        })
    }

    /// List all snapshots of one group variant, newest version first.
    pub async fn find_by_entity(&self, group_id: Uuid) -> AppResult<Vec<GroupSnapshot>> {
        sqlx::query_as::<_, GroupSnapshot>(
            "SELECT * FROM group_snapshots WHERE group_id = $1 ORDER BY version DESC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list group snapshots", e)
        })
    }
}

/// Insert statement shared by the pooled and transactional paths.
const INSERT_SNAPSHOT_SQL: &str = "INSERT INTO group_snapshots \
         (id, group_id, translation_set_id, language, name, description, debut_on, \
          fanclub_url, version, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

fn map_insert_error(snapshot: &GroupSnapshot, e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::conflict(format!(
            "Snapshot already exists for group {} at version {}",
            snapshot.group_id, snapshot.version
        ))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to create group snapshot", e)
    }
}
