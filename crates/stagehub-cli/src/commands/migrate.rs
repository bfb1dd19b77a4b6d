//! Database migration management commands.

use clap::{Args, Subcommand};

use stagehub_core::error::AppError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check database connectivity
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    match &args.command {
        MigrateCommand::Run => {
            let pool = super::create_db_pool(&config).await?;
            println!("Running database migrations...");
            stagehub_database::migration::run_migrations(&pool).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            let pool = stagehub_database::connection::DatabasePool::connect(&config.database).await?;
            if pool.health_check().await? {
                output::print_success("Database connection OK.");
            }
        }
    }

    Ok(())
}
