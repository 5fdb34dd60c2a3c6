//! Capability traits between the interaction layer and its environment
//!
//! The interaction layer never touches the terminal, filesystem or system
//! clipboard directly. Each concern sits behind one of these traits so the
//! reversal flow can run against in-memory doubles in tests.

use std::time::Instant;

use anyhow::Result;

use super::notify::Notice;

/// Supplies the raw text to reverse
pub trait InputSource {
    fn read_text(&mut self) -> Result<String>;
}

/// Receives the reversed text for display
pub trait OutputSink {
    fn show_result(&mut self, text: &str) -> Result<()>;
}

/// Persists named string settings across sessions
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Shows short-lived categorized messages
pub trait NotificationSurface {
    fn notify(&mut self, notice: Notice, now: Instant);

    /// Advance time-based behavior (auto-dismiss). No-op by default.
    fn tick(&mut self, _now: Instant) {}
}

/// Writes text to a clipboard
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}
