//! Principal management commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use uuid::Uuid;

use stagehub_core::error::AppError;
use stagehub_database::repositories::PrincipalRepository;
use stagehub_entity::principal::{Principal, PrincipalRole};

use crate::output;

/// Arguments for principal commands
#[derive(Debug, Args)]
pub struct PrincipalArgs {
    /// Principal subcommand
    #[command(subcommand)]
    pub command: PrincipalCommand,
}

/// Principal subcommands
#[derive(Debug, Subcommand)]
pub enum PrincipalCommand {
    /// Create a principal
    Create {
        /// Display name
        name: String,
        /// Role (admin, agency_staff, group_staff, talent_staff, viewer)
        #[arg(short, long)]
        role: String,
        /// Agency scope (translation set id)
        #[arg(long)]
        agency: Option<Uuid>,
        /// Group scopes (translation set ids)
        #[arg(long)]
        group: Vec<Uuid>,
        /// Talent scopes (translation set ids)
        #[arg(long)]
        talent: Vec<Uuid>,
    },
}

/// Execute principal commands
pub async fn execute(args: &PrincipalArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let repo = PrincipalRepository::new(pool);

    match &args.command {
        PrincipalCommand::Create {
            name,
            role,
            agency,
            group,
            talent,
        } => {
            let principal = Principal {
                id: Uuid::new_v4(),
                name: name.clone(),
                role: role.parse::<PrincipalRole>()?,
                agency_id: *agency,
                group_ids: group.clone(),
                talent_ids: talent.clone(),
                created_at: Utc::now(),
            };
            repo.create(&principal).await?;
            output::print_success(&format!("Created principal {} ({})", name, principal.id));
        }
    }

    Ok(())
}
