//! CLI configuration management

use anyhow::{Context, Result};
use oshinko_core::logging::{LogRotation, LoggingConfig};
use oshinko_core::{Backoff, SelectorLabels, WaitPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace to use instead of the context's namespace
    pub namespace: Option<String>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    pub default_output: String,
    pub log_level: String,
    /// Directory for rolling JSON log files
    pub log_dir: Option<String>,
    pub log_rotation: LogRotation,
    /// Emit JSON lines on stderr as well
    pub log_json: bool,
    pub labels: SelectorLabels,
    pub wait: WaitSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            context: None,
            default_output: "table".to_string(),
            log_level: "warn".to_string(),
            log_dir: None,
            log_rotation: LogRotation::Daily,
            log_json: false,
            labels: SelectorLabels::default(),
            wait: WaitSettings::default(),
        }
    }
}

/// `[wait]` section: how long to wait for controllers to drain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    pub max_attempts: u32,
    pub interval_ms: u64,
    pub backoff: BackoffKind,
    /// Cap for exponential backoff
    pub max_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    Fixed,
    Exponential,
}

impl Default for WaitSettings {
    fn default() -> Self {
        let policy = WaitPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            interval_ms: policy.interval.as_millis() as u64,
            backoff: BackoffKind::Fixed,
            max_interval_ms: 10_000,
        }
    }
}

impl WaitSettings {
    pub fn policy(&self) -> WaitPolicy {
        let backoff = match self.backoff {
            BackoffKind::Fixed => Backoff::Fixed,
            BackoffKind::Exponential => Backoff::Exponential {
                max_interval: Duration::from_millis(self.max_interval_ms),
            },
        };

        WaitPolicy::new(self.max_attempts, Duration::from_millis(self.interval_ms))
            .with_backoff(backoff)
    }
}

impl Config {
    /// Load `~/.config/oshinko/cli.toml`
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: its label keys decide what gets deleted.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;

        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".config/oshinko/cli.toml"))
    }

    /// Logging settings at `level`; `OSHINKO_LOG_PATH` is used when no
    /// `log_dir` is configured
    pub fn logging(&self, level: String) -> LoggingConfig {
        let env = LoggingConfig::from_env();
        LoggingConfig {
            level,
            file_path: self.log_dir.clone().or(env.file_path),
            rotation: self.log_rotation,
            json_format: self.log_json,
        }
    }
}
