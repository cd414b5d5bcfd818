//! Structured Logger
//!
//! Wraps `tracing` to provide console output, optional NDJSON file rotation,
//! and environment-based level control.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "pinforge.log";

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info`.
    pub level: String,
    /// Directory for `pinforge.log.YYYY-MM-DD` files.
    pub dir: Option<PathBuf>,
    /// Emit console lines as JSON.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Keeps the background file writer alive; drop it on shutdown to flush.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global structured logger.
pub fn init_logger(settings: &LoggingSettings) -> Result<LogGuard> {
    let console_layer = if settings.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("A global logger is already installed")?;

    Ok(LogGuard { _file: guard })
}
