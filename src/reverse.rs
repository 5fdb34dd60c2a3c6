//! Text reversal engine
//!
//! Pure functions only. Callers decide whether an input is worth reversing
//! (blank input, length limits); every `&str` is a valid input here.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Unit of reversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseMode {
    /// Reverse Unicode scalar values. Combining marks end up on the
    /// preceding base character after reversal.
    #[default]
    Chars,
    /// Reverse extended grapheme clusters, keeping user-perceived
    /// characters intact.
    ///
    /// Not an involution: the output is segmented afresh, so clusters can
    /// re-form around new neighbours. A leading combining mark, an odd run
    /// of regional indicators, or Hangul jamo that join once reordered do
    /// not survive a second reversal.
    Graphemes,
}

impl ReverseMode {
    /// Parse mode string from config or env
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chars" | "char" | "scalar" => Some(Self::Chars),
            "graphemes" | "grapheme" => Some(Self::Graphemes),
            _ => None,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chars => "chars",
            Self::Graphemes => "graphemes",
        }
    }
}

/// Reverse `text` by Unicode scalar value.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reverse `text` using the given unit.
pub fn reverse_with(text: &str, mode: ReverseMode) -> String {
    match mode {
        ReverseMode::Chars => reverse(text),
        ReverseMode::Graphemes => text.graphemes(true).rev().collect(),
    }
}
