//! Agency repository implementations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::Version;
use stagehub_entity::agency::{Agency, AgencySnapshot};

/// Repository for published agency variants.
#[derive(Debug, Clone)]
pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    /// Create a new agency repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an agency variant by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Agency>> {
        sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find agency", e))
    }

    /// Load every language variant of one agency.
    pub async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Agency>> {
        sqlx::query_as::<_, Agency>(
            "SELECT * FROM agencies WHERE translation_set_id = $1 ORDER BY language",
        )
        .bind(set_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load agency variants", e)
        })
    }

    /// Upsert an agency variant. Does not create a snapshot; the service
    /// layer controls when snapshots are taken.
    pub async fn save(&self, agency: &Agency) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO agencies \
                 (id, translation_set_id, language, name, description, founded_on, website_url, \
                  version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 founded_on = EXCLUDED.founded_on, \
                 website_url = EXCLUDED.website_url, \
                 version = EXCLUDED.version, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(agency.id)
        .bind(agency.translation_set_id)
        .bind(agency.language)
        .bind(&agency.name)
        .bind(&agency.description)
        .bind(agency.founded_on)
        .bind(&agency.website_url)
        .bind(agency.version)
        .bind(agency.created_at)
        .bind(agency.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save agency", e))?;
        Ok(())
    }

    /// Update an agency variant inside a transaction, guarded by its
    /// pre-update version. Zero affected rows means another writer got
    /// there first and the whole transaction must be abandoned.
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        agency: &Agency,
        expected_version: Version,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE agencies SET \
                 name = $1, description = $2, founded_on = $3, website_url = $4, \
                 version = $5, updated_at = $6 \
             WHERE id = $7 AND version = $8",
        )
        .bind(&agency.name)
        .bind(&agency.description)
        .bind(agency.founded_on)
        .bind(&agency.website_url)
        .bind(agency.version)
        .bind(agency.updated_at)
        .bind(agency.id)
        .bind(expected_version)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update agency", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Agency {} was modified concurrently (expected version {expected_version})",
                agency.id
            )));
        }
        Ok(())
    }
}

/// Repository for agency snapshots. Append-only.
#[derive(Debug, Clone)]
pub struct AgencySnapshotRepository {
    pool: PgPool,
}

impl AgencySnapshotRepository {
    /// Create a new agency snapshot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a snapshot. An (agency id, version) pair can only ever be
    /// written once; a duplicate surfaces as a conflict.
    pub async fn create(&self, snapshot: &AgencySnapshot) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.agency_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.name)
            .bind(&snapshot.description)
            .bind(snapshot.founded_on)
            .bind(&snapshot.website_url)
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
        snapshot: &AgencySnapshot,
    ) -> AppResult<()> {
        sqlx::query(INSERT_SNAPSHOT_SQL)
            .bind(snapshot.id)
            .bind(snapshot.agency_id)
            .bind(snapshot.translation_set_id)
            .bind(snapshot.language)
            .bind(&snapshot.name)
            .bind(&snapshot.description)
            .bind(snapshot.founded_on)
            .bind(&snapshot.website_url)
            .bind(snapshot.version)
            .bind(snapshot.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_insert_error(snapshot, e))?;
        Ok(())
    }

    /// Find the snapshot of one agency variant at one version.
    pub async fn find_by_entity_and_version(
        &self,
        agency_id: Uuid,
        version: Version,
    ) -> AppResult<Option<AgencySnapshot>> {
        sqlx::query_as::<_, AgencySnapshot>(
            "SELECT * FROM agency_snapshots WHERE agency_id = $1 AND version = $2",
        )
        .bind(agency_id)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find agency snapshot", e)
        })
    }

    /// Bulk-load all snapshots of a translation set at one version with a
    /// single query.
    pub async fn find_by_translation_set_and_version(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<AgencySnapshot>> {
        sqlx::query_as::<_, AgencySnapshot>(
            "SELECT * FROM agency_snapshots WHERE translation_set_id = $1 AND version = $2",
        )
        .bind(set_id)
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load agency snapshots", e)
        })
    }

    /// List all snapshots of one agency variant, newest version first.
    pub async fn find_by_entity(&self, agency_id: Uuid) -> AppResult<Vec<AgencySnapshot>> {
        sqlx::query_as::<_, AgencySnapshot>(
            "SELECT * FROM agency_snapshots WHERE agency_id = $1 ORDER BY version DESC",
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list agency snapshots", e)
        })
    }
}

/// Insert statement shared by the pooled and transactional paths.
const INSERT_SNAPSHOT_SQL: &str = "INSERT INTO agency_snapshots \
         (id, agency_id, translation_set_id, language, name, description, founded_on, \
          website_url, version, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

fn map_insert_error(snapshot: &AgencySnapshot, e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::conflict(format!(
            "Snapshot already exists for agency {} at version {}",
            snapshot.agency_id, snapshot.version
        ))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to create agency snapshot", e)
    }
}
