//! History repository implementation.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stagehub_core::error::{AppError, ErrorKind};
use stagehub_core::result::AppResult;
use stagehub_core::types::pagination::{PageRequest, PageResponse};
use stagehub_entity::history::{HistoryRecord, NewHistoryRecord};

/// Insert statement shared by the pooled and transactional paths.
const INSERT_SQL: &str = "INSERT INTO history \
         (editor_id, submitter_id, published_id, draft_id, from_status, to_status, \
          from_version, to_version, subject, action, recorded_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *";

/// Repository for history records. Append-only; records are never updated
/// or deleted.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    /// Create a new history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a history record.
    pub async fn create(&self, record: &NewHistoryRecord) -> AppResult<HistoryRecord> {
        record.validate()?;
        bind_record(sqlx::query_as::<_, HistoryRecord>(INSERT_SQL), record)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create history record", e)
            })
    }

    /// Append a history record inside an existing transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &NewHistoryRecord,
    ) -> AppResult<HistoryRecord> {
        record.validate()?;
        bind_record(sqlx::query_as::<_, HistoryRecord>(INSERT_SQL), record)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create history record", e)
            })
    }

    /// List all records for one published entity, newest first.
    pub async fn find_for_published(&self, published_id: Uuid) -> AppResult<Vec<HistoryRecord>> {
        sqlx::query_as::<_, HistoryRecord>(
            "SELECT * FROM history WHERE published_id = $1 ORDER BY recorded_at DESC",
        )
        .bind(published_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load history", e))
    }

    /// Search history with optional filters.
    pub async fn search(
        &self,
        editor_id: Option<Uuid>,
        action: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HistoryRecord>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if editor_id.is_some() {
            conditions.push(format!("editor_id = ${param_idx}"));
            param_idx += 1;
        }
        if action.is_some() {
            conditions.push(format!("action = ${param_idx}::history_action"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM history {where_clause}");
        let select_sql = format!(
            "SELECT * FROM history {where_clause} ORDER BY recorded_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, HistoryRecord>(&select_sql);

        if let Some(eid) = editor_id {
            count_query = count_query.bind(eid);
            select_query = select_query.bind(eid);
        }
        if let Some(a) = action {
            count_query = count_query.bind(a.to_string());
            select_query = select_query.bind(a.to_string());
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count history records", e)
        })?;

        let records = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search history", e)
            })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

type HistoryQuery<'q> =
    sqlx::query::QueryAs<'q, Postgres, HistoryRecord, sqlx::postgres::PgArguments>;

fn bind_record<'q>(query: HistoryQuery<'q>, record: &'q NewHistoryRecord) -> HistoryQuery<'q> {
    query
        .bind(record.editor_id)
        .bind(record.submitter_id)
        .bind(record.published_id)
        .bind(record.draft_id)
        .bind(&record.from_status)
        .bind(&record.to_status)
        .bind(record.from_version)
        .bind(record.to_version)
        .bind(&record.subject)
        .bind(record.action)
        .bind(record.recorded_at)
}
