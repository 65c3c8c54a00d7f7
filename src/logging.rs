use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory log files are written to
pub const LOGS_DIR: &str = "logs";

/// Base name of the daily-rotated log file
pub const LOG_FILE: &str = "crew.log";

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Install the file-only tracing subscriber
///
/// Stdout is reserved for crew output, so nothing is logged to the terminal.
pub fn init_logging() -> Result<()> {
    std::fs::create_dir_all(LOGS_DIR)
        .with_context(|| format!("Failed to create log directory '{}'", LOGS_DIR))?;

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, LOGS_DIR, LOG_FILE))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Crew logging to {}/{}", LOGS_DIR, LOG_FILE);
    Ok(())
}
