use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const DEFAULT_FILTER: &str = "bee_client=info,bee_core=info";

/// Send tracing output to the configured log file.
///
/// The terminal belongs to the UI, so nothing is written to stdout. The
/// returned guard flushes the writer on drop and must live as long as the
/// program does.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_directory).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.log_directory.display()
        )
    })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let appender = tracing_appender::rolling::never(&config.log_directory, &config.log_file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
