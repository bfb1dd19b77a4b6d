//! Principal repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_entity::principal::Principal;
use stagehub_entity::store::PrincipalStore;

/// Repository for acting principals.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    pool: PgPool,
}

impl PrincipalRepository {
    /// Create a new principal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a principal by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>("SELECT * FROM principals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find principal", e))
    }

    /// Create a principal.
    pub async fn create(&self, principal: &Principal) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO principals (id, name, role, agency_id, group_ids, talent_ids, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(principal.id)
        .bind(&principal.name)
        .bind(principal.role)
        .bind(principal.agency_id)
        .bind(&principal.group_ids)
        .bind(&principal.talent_ids)
        .bind(principal.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create principal", e))?;
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for PrincipalRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Principal>> {
        PrincipalRepository::find_by_id(self, id).await
    }
}
