//! History service — audit trail queries over the append-only history log.

use std::sync::Arc;

use uuid::Uuid;

use stagehub_core::AppResult;
use stagehub_core::error::AppError;
use stagehub_core::types::pagination::{PageRequest, PageResponse};
use stagehub_database::repositories::HistoryRepository;
use stagehub_entity::history::{HistoryAction, HistoryRecord};
use stagehub_entity::principal::{Principal, PrincipalRole};
use stagehub_entity::store::PrincipalStore;

use crate::context::RequestContext;

/// Read access to the edit history.
///
/// History is audit data, so it is limited to staff roles; viewers cannot
/// see who changed what.
pub struct HistoryService {
    /// History repository.
    history_repo: Arc<HistoryRepository>,
    /// Principal lookup.
    principals: Arc<dyn PrincipalStore>,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(history_repo: Arc<HistoryRepository>, principals: Arc<dyn PrincipalStore>) -> Self {
        Self {
            history_repo,
            principals,
        }
    }

    /// Lists all history records for one published entity, newest first.
    pub async fn for_published(
        &self,
        ctx: &RequestContext,
        published_id: Uuid,
    ) -> AppResult<Vec<HistoryRecord>> {
        self.require_staff(ctx).await?;
        self.history_repo.find_for_published(published_id).await
    }

    /// Searches history with optional editor and action filters.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        editor_id: Option<Uuid>,
        action: Option<HistoryAction>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HistoryRecord>> {
        self.require_staff(ctx).await?;
        let action_name = action.map(|a| a.to_string());
        self.history_repo
            .search(editor_id, action_name.as_deref(), page)
            .await
    }

    /// Loads the acting principal and rejects viewers.
    async fn require_staff(&self, ctx: &RequestContext) -> AppResult<Principal> {
        let principal = self
            .principals
            .find_by_id(ctx.principal_id)
            .await?
            .ok_or_else(|| AppError::not_found("Principal not found"))?;

        if principal.role == PrincipalRole::Viewer {
            return Err(AppError::authorization(
                "Viewing history requires a staff role",
            ));
        }

        Ok(principal)
    }
}
