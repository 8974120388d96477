//! AutoFrame - adaptive banner layout
//!
//! Main entry point for the AutoFrame CLI.

mod cli;
mod commands;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autoframe_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::Cli;

/// Initialize tracing with a stderr layer and a daily rolling file.
///
/// Stdout is reserved for command output and panel replies.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&logging.directory)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("autoframe")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&logging.directory)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive until exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    info!("Configuration: {}", cli.config.display());

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    commands::run(cli.command, &config).await
}
