//! CLI command definitions and dispatch.

pub mod history;
pub mod migrate;
pub mod principal;
pub mod rollback;
pub mod versions;

use clap::{Parser, Subcommand};

use stagehub_core::config::AppConfig;
use stagehub_core::error::AppError;

use crate::output::OutputFormat;

/// StageHub — multilingual talent content administration
#[derive(Debug, Parser)]
#[command(name = "stagehub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merges config/default.toml with
    /// config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Roll a translation set back to an earlier version
    Rollback(rollback::RollbackArgs),
    /// List the recorded versions of one entity
    Versions(versions::VersionsArgs),
    /// Edit history queries
    History(history::HistoryArgs),
    /// Principal management
    Principal(principal::PrincipalArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Rollback(args) => rollback::execute(args, &self.env, self.format).await,
            Commands::Versions(args) => versions::execute(args, &self.env, self.format).await,
            Commands::History(args) => history::execute(args, &self.env, self.format).await,
            Commands::Principal(args) => principal::execute(args, &self.env).await,
        }
    }
}

/// Content kind selector shared by content commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    /// Agency profiles
    Agency,
    /// Group profiles
    Group,
    /// Talent profiles
    Talent,
    /// Song profiles
    Song,
}

/// Helper: load configuration for the selected environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = stagehub_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
