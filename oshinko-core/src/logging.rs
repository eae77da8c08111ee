//! Logging configuration
//!
//! Console output goes to stderr so it never mixes with command output.
//! An optional rolling file keeps JSON lines for later inspection.

use serde::{Deserialize, Serialize};
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,             // trace, debug, info, warn, error
    pub file_path: Option<String>, // directory for rolling log files
    pub rotation: LogRotation,
    pub json_format: bool, // JSON on the console too
}

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: None,
            rotation: LogRotation::Daily,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber
    ///
    /// Hold on to the returned guard until exit; dropping it stops the file
    /// writer and loses buffered lines.
    pub fn init(&self) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
        // RUST_LOG wins over the configured level
        let env_filter =
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))?;

        let console_layer = if self.json_format {
            fmt::layer().json().with_writer(io::stderr).boxed()
        } else {
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .boxed()
        };

        let registry = tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer);

        let guard = if let Some(ref path) = self.file_path {
            let file_appender = match self.rotation {
                LogRotation::Hourly => rolling::hourly(path, "oshinko.log"),
                LogRotation::Daily => rolling::daily(path, "oshinko.log"),
                LogRotation::Never => rolling::never(path, "oshinko.log"),
            };
            let (writer, guard) = non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(writer);

            registry.with(file_layer).try_init()?;
            Some(guard)
        } else {
            registry.try_init()?;
            None
        };

        tracing::debug!("Logging initialized - level: {}", self.level);

        Ok(guard)
    }

    /// Configuration from `RUST_LOG` and `OSHINKO_LOG_PATH`
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
        let file_path = std::env::var("OSHINKO_LOG_PATH").ok();

        Self {
            level,
            file_path,
            ..Default::default()
        }
    }
}
