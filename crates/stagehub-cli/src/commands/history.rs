//! Edit history CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use stagehub_core::error::AppError;
use stagehub_core::types::pagination::PageRequest;
use stagehub_database::repositories::{HistoryRepository, PrincipalRepository};
use stagehub_entity::history::{HistoryAction, HistoryRecord};
use stagehub_service::{HistoryService, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for history commands
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Acting principal id
    #[arg(short, long)]
    pub principal: Uuid,

    /// History subcommand
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands
#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Search the history log
    Search {
        /// Filter by editor (principal id)
        #[arg(long)]
        editor: Option<Uuid>,
        /// Filter by action (draft_status_change, publish, translate, rollback)
        #[arg(short, long)]
        action: Option<String>,
        /// Number of results
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
    /// List the history of one published entity
    For {
        /// Published entity id
        entity: Uuid,
    },
}

/// History display row
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    /// Time
    time: String,
    /// Editor id
    editor: String,
    /// Action
    action: String,
    /// Version transition
    versions: String,
    /// Subject
    subject: String,
}

impl From<&HistoryRecord> for HistoryRow {
    fn from(record: &HistoryRecord) -> Self {
        let versions = match (record.from_version, record.to_version) {
            (Some(from), Some(to)) => format!("{from} -> {to}"),
            _ => String::new(),
        };
        Self {
            time: record.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            editor: record.editor_id.to_string(),
            action: record.action.to_string(),
            versions,
            subject: record.subject.clone(),
        }
    }
}

/// Execute history commands
pub async fn execute(args: &HistoryArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let service = HistoryService::new(
        Arc::new(HistoryRepository::new(pool.clone())),
        Arc::new(PrincipalRepository::new(pool)),
    );
    let ctx = RequestContext::new(args.principal);

    let records = match &args.command {
        HistoryCommand::Search {
            editor,
            action,
            limit,
        } => {
            let action = action
                .as_deref()
                .map(str::parse::<HistoryAction>)
                .transpose()?;
            let page = PageRequest::new(1, *limit);
            service.search(&ctx, *editor, action, &page).await?.items
        }
        HistoryCommand::For { entity } => service.for_published(&ctx, *entity).await?,
    };

    let rows: Vec<HistoryRow> = records.iter().map(HistoryRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
