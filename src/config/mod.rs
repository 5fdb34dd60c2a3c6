//! Configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/reverso/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::InteractionSettings;
use crate::prefs::FilePreferenceStore;
use crate::reverse::ReverseMode;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LoggingConfig};

#[cfg(test)]
use observability::LogRotation;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_MAX_LENGTH: usize = 500;
const DEFAULT_RESULT_DELAY_MS: u64 = 300;
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Unit of reversal: chars or graphemes
    pub reverse_mode: ReverseMode,

    /// Input length limit in chars (None = unlimited)
    pub max_length: Option<usize>,

    /// Pause before the reversed text appears
    pub result_delay: Duration,

    /// How long toasts stay on screen
    pub toast_duration: Duration,

    /// Where the theme preference is stored
    pub prefs_path: PathBuf,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reverse_mode: ReverseMode::default(),
            max_length: Some(DEFAULT_MAX_LENGTH),
            result_delay: Duration::from_millis(DEFAULT_RESULT_DELAY_MS),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            prefs_path: default_prefs_path(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_prefs_path() -> PathBuf {
    FilePreferenceStore::default_path().unwrap_or_else(|| PathBuf::from("./prefs.toml"))
}

/// `0` means unlimited
fn max_length_from(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub reverse_mode: Option<String>,
    pub max_length: Option<usize>,
    pub result_delay_ms: Option<u64>,
    pub toast_duration_ms: Option<u64>,
    pub prefs_path: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/reverso/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("reverso").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse a config file. A missing file yields defaults; a file that
    /// exists but cannot be read or parsed is an error.
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse configuration file {}\n\n  Tip: check for missing quotes, \
                     invalid booleans (use true/false) and typos in section names.\n  \
                     Run `reverso config --reset` to start over.",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read configuration file {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Mode: env > file > default. Unknown values fall back with a warning
        let reverse_mode = env("REVERSO_MODE")
            .or(file.reverse_mode)
            .map(|s| {
                ReverseMode::from_str(&s).unwrap_or_else(|| {
                    eprintln!("Warning: unknown reverse_mode {:?}, using \"chars\"", s);
                    ReverseMode::Chars
                })
            })
            .unwrap_or(defaults.reverse_mode);

        // Max length: env > file > default (0 = unlimited)
        let max_length = env("REVERSO_MAX_LENGTH")
            .and_then(|v| v.parse().ok())
            .or(file.max_length)
            .map(max_length_from)
            .unwrap_or(defaults.max_length);

        let result_delay = file
            .result_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.result_delay);

        let toast_duration = file
            .toast_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.toast_duration);

        // Preferences path: env > file > default
        let prefs_path = env("REVERSO_PREFS")
            .or(file.prefs_path)
            .map(PathBuf::from)
            .unwrap_or(defaults.prefs_path);

        // Log directory env override applies on top of the [logging] section
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(dir) = env("REVERSO_LOG_DIR") {
            logging.file_dir = PathBuf::from(dir);
        }

        Self {
            reverse_mode,
            max_length,
            result_delay,
            toast_duration,
            prefs_path,
            logging,
        }
    }

    /// Settings for the interaction layer
    pub fn interaction_settings(&self) -> InteractionSettings {
        InteractionSettings {
            mode: self.reverse_mode,
            result_delay: self.result_delay,
            max_length: self.max_length,
        }
    }
}
