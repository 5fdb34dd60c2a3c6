//! Display-mode preference
//!
//! The only persisted state: `theme = "light" | "dark"` in a flat TOML file.
//! When nothing is stored, the terminal's ambient signal decides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::app::ports::PreferenceStore;

/// Key under which the display mode is stored
pub const THEME_KEY: &str = "theme";

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stores
// ─────────────────────────────────────────────────────────────────────────────

/// Preferences kept in a flat TOML table on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: ~/.config/reverso/prefs.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("reverso").join("prefs.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<toml::Table> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents
                .parse::<toml::Table>()
                .with_context(|| format!("Failed to parse {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.load()?.remove(key) {
            Some(toml::Value::String(value)) => Ok(Some(value)),
            Some(other) => {
                tracing::warn!(key, "Ignoring non-string preference {}", other);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Only a file that is not TOML at all is replaced; other keys of
        // any type are kept
        let mut values = self.load().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable preferences: {:#}", e);
            toml::Table::new()
        });
        values.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string(&values).context("Failed to serialize preferences")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(key, value, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

/// Preferences that last for one session only
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ambient signal
// ─────────────────────────────────────────────────────────────────────────────

/// The host's own light/dark hint
pub trait AmbientSignal {
    fn display_mode(&self) -> Option<DisplayMode>;
}

/// Reads `REVERSO_THEME`, then the `COLORFGBG` convention ("fg;bg" with
/// ANSI color indices) set by rxvt, Konsole, iTerm2 and others.
#[derive(Debug, Default)]
pub struct EnvAmbientSignal;

impl AmbientSignal for EnvAmbientSignal {
    fn display_mode(&self) -> Option<DisplayMode> {
        ambient_from_env(|key| std::env::var(key).ok())
    }
}

/// `REVERSO_THEME` wins over `COLORFGBG`; an unparseable override is skipped
pub(crate) fn ambient_from_env(env: impl Fn(&str) -> Option<String>) -> Option<DisplayMode> {
    env("REVERSO_THEME")
        .and_then(|v| DisplayMode::from_str(&v))
        .or_else(|| env("COLORFGBG").and_then(|v| parse_colorfgbg(&v)))
}

/// Fixed signal, or none
impl AmbientSignal for Option<DisplayMode> {
    fn display_mode(&self) -> Option<DisplayMode> {
        *self
    }
}

/// Map a `COLORFGBG` value to a display mode from its background index
pub fn parse_colorfgbg(value: &str) -> Option<DisplayMode> {
    // Some terminals insert a middle field ("15;default;0"); bg is always last
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(DisplayMode::Dark),
        7 | 9..=15 => Some(DisplayMode::Light),
        _ => None,
    }
}

/// Stored preference, else ambient signal, else light
pub fn resolve_display_mode(store: &dyn PreferenceStore, ambient: &dyn AmbientSignal) -> DisplayMode {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => match DisplayMode::from_str(&value) {
            Some(mode) => return mode,
            None => tracing::warn!("Ignoring unknown stored theme {:?}", value),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not read theme preference: {:#}", e),
    }
    ambient.display_mode().unwrap_or_default()
}

/// Persist the display mode
pub fn save_display_mode(store: &mut dyn PreferenceStore, mode: DisplayMode) -> Result<()> {
    store.set(THEME_KEY, mode.as_str())
}
