//! Versions command: list the recorded snapshots of one entity.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use stagehub_auth::policy::ScopedPolicy;
use stagehub_core::clock::SystemClock;
use stagehub_core::error::AppError;
use stagehub_database::repositories::PrincipalRepository;
use stagehub_database::stores::{AgencyStore, GroupStore, SongStore, TalentStore};
use stagehub_entity::content::ContentSnapshot;
use stagehub_entity::store::ContentStore;
use stagehub_service::{RequestContext, RollbackService};

use crate::output::{self, OutputFormat};

use super::KindArg;

/// Arguments for the versions command
#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Content kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Entity (language variant) id
    pub entity: Uuid,

    /// Acting principal id
    #[arg(short, long)]
    pub principal: Uuid,
}

/// Snapshot display row
#[derive(Debug, Serialize, Tabled)]
struct SnapshotRow {
    /// Version
    version: String,
    /// Display name at that version
    name: String,
    /// When the snapshot was taken
    captured_at: String,
}

/// Execute the versions command
pub async fn execute(args: &VersionsArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    match args.kind {
        KindArg::Agency => run(AgencyStore::new(pool.clone()), pool, args, format).await,
        KindArg::Group => run(GroupStore::new(pool.clone()), pool, args, format).await,
        KindArg::Talent => run(TalentStore::new(pool.clone()), pool, args, format).await,
        KindArg::Song => run(SongStore::new(pool.clone()), pool, args, format).await,
    }
}

async fn run<S: ContentStore>(
    store: S,
    pool: sqlx::PgPool,
    args: &VersionsArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = RollbackService::new(
        Arc::new(store),
        Arc::new(PrincipalRepository::new(pool)),
        Arc::new(ScopedPolicy::new()),
        Arc::new(SystemClock),
    );

    let ctx = RequestContext::new(args.principal);
    let snapshots = service.versions(&ctx, args.entity).await?;

    let rows: Vec<SnapshotRow> = snapshots
        .iter()
        .map(|s| SnapshotRow {
            version: s.version().to_string(),
            name: s.display_name().to_string(),
            captured_at: s.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
