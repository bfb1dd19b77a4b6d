//! StageHub CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stagehub_core::config::LoggingConfig;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config problems are reported by the command itself; fall back to
    // default logging settings so the error is still visible.
    let logging = commands::load_config(&cli.env)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber from the logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if logging.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}
