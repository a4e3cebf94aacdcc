mod analytics;
mod config;
mod db;
mod export;
mod format;
mod import;
mod models;
mod run;
mod view;

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use config::{Config, LogFormat};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    tracing::debug!(db = %config.db_path.display(), user = %config.user, "Loaded config");

    let mut db = db::Database::open(&config.db_path)?;
    run::as_cli(command_args(&args), &mut db, &config)
}

/// Everything after the program name; empty when argv is.
fn command_args(args: &[String]) -> &[String] {
    args.get(1..).unwrap_or_default()
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}
