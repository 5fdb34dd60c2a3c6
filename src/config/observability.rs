//! `[logging]` section
//!
//! Where logs go besides the TUI buffer or stderr. Unknown values fall back
//! to the default with a warning instead of failing the whole config.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{self, RollingFileAppender};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file, appended forever
    Never,
}

impl LogRotation {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    /// File appender rolling at this interval
    pub fn appender(&self, dir: &Path, prefix: &str) -> RollingFileAppender {
        match self {
            Self::Hourly => rolling::hourly(dir, prefix),
            Self::Daily => rolling::daily(dir, prefix),
            Self::Never => rolling::never(dir, prefix),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter level for reverso's own events; RUST_LOG overrides it
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. "reverso" -> "reverso.2026-10-19"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: default_log_dir(),
            file_rotation: LogRotation::Daily,
            file_prefix: "reverso".to_string(),
        }
    }
}

/// ~/.cache/reverso/logs, or ./logs without a cache directory
fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("reverso").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let mut config = Self::default();
        let Some(file) = file else {
            return config;
        };

        if let Some(level) = file.level {
            let level = level.trim().to_lowercase();
            if LEVELS.contains(&level.as_str()) {
                config.level = level;
            } else {
                eprintln!("Warning: unknown log level {:?}, using \"info\"", level);
            }
        }
        if let Some(rotation) = file.file_rotation {
            match LogRotation::from_str(&rotation) {
                Some(r) => config.file_rotation = r,
                None => eprintln!("Warning: unknown file_rotation {:?}, using \"daily\"", rotation),
            }
        }
        if let Some(enabled) = file.file_enabled {
            config.file_enabled = enabled;
        }
        if let Some(dir) = file.file_dir {
            config.file_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = file.file_prefix.filter(|p| !p.trim().is_empty()) {
            config.file_prefix = prefix;
        }
        config
    }
}
