//! Rollback command: restore a translation set to an earlier version.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use stagehub_auth::policy::ScopedPolicy;
use stagehub_core::clock::SystemClock;
use stagehub_core::error::AppError;
use stagehub_core::types::Version;
use stagehub_database::repositories::PrincipalRepository;
use stagehub_database::stores::{AgencyStore, GroupStore, SongStore, TalentStore};
use stagehub_entity::content::PublishedContent;
use stagehub_entity::store::ContentStore;
use stagehub_service::{RequestContext, RollbackService};

use crate::output::{self, OutputFormat};

use super::KindArg;

/// Arguments for the rollback command
#[derive(Debug, Args)]
pub struct RollbackArgs {
    /// Content kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Id of any language variant of the translation set
    pub entity: Uuid,

    /// Version to restore
    #[arg(short, long)]
    pub to: i32,

    /// Acting principal id
    #[arg(short, long)]
    pub principal: Uuid,
}

/// Restored variant display row
#[derive(Debug, Serialize, Tabled)]
struct VariantRow {
    /// Variant id
    id: String,
    /// Language
    language: String,
    /// Display name after restore
    name: String,
    /// New version
    version: String,
}

/// Execute the rollback command
pub async fn execute(args: &RollbackArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let target = Version::new(args.to)?;

    match args.kind {
        KindArg::Agency => run(AgencyStore::new(pool.clone()), pool, args, target, format).await,
        KindArg::Group => run(GroupStore::new(pool.clone()), pool, args, target, format).await,
        KindArg::Talent => run(TalentStore::new(pool.clone()), pool, args, target, format).await,
        KindArg::Song => run(SongStore::new(pool.clone()), pool, args, target, format).await,
    }
}

async fn run<S: ContentStore>(
    store: S,
    pool: sqlx::PgPool,
    args: &RollbackArgs,
    target: Version,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = RollbackService::new(
        Arc::new(store),
        Arc::new(PrincipalRepository::new(pool)),
        Arc::new(ScopedPolicy::new()),
        Arc::new(SystemClock),
    );

    let ctx = RequestContext::new(args.principal);
    let variants = service.rollback(&ctx, args.entity, target).await?;

    let rows: Vec<VariantRow> = variants
        .iter()
        .map(|v| VariantRow {
            id: v.id().to_string(),
            language: v.language().to_string(),
            name: v.display_name().to_string(),
            version: v.version().to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    output::print_success(&format!(
        "Restored {} language variant(s) to the state of version {}",
        rows.len(),
        target
    ));
    Ok(())
}
