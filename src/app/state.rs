//! Application state and the UI flags derived from it
//!
//! Everything the screen shows is computed from `AppState` by the pure
//! functions below; the renderer never keeps its own copies.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::ports::{InputSource, OutputSink};
use crate::prefs::DisplayMode;

/// How close the input is to the length limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CounterLevel {
    Normal,
    /// At or above 90% of the limit
    Near,
    Over,
}

/// Serializable snapshot of the interaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Text being edited
    pub input: String,
    /// Cursor position in chars
    pub cursor: usize,
    /// Last reversed text, if any
    pub result: Option<String>,
    /// A reversal has been requested and is waiting for its reveal
    pub pending: bool,
    pub theme: DisplayMode,
    /// Maximum input length in chars; `None` means unlimited
    pub max_length: Option<usize>,
}

impl AppState {
    pub fn new(theme: DisplayMode, max_length: Option<usize>) -> Self {
        Self {
            theme,
            max_length,
            ..Default::default()
        }
    }

    // ─── Derived flags ───────────────────────────────────────────

    /// Input length in chars
    pub fn input_length(&self) -> usize {
        self.input.chars().count()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Reverse action is available
    pub fn can_reverse(&self) -> bool {
        !self.is_blank() && !self.pending
    }

    /// Copy action is available
    pub fn can_copy(&self) -> bool {
        self.result.as_deref().is_some_and(|r| !r.is_empty())
    }

    pub fn counter_label(&self) -> String {
        match self.max_length {
            Some(max) => format!("{} / {} characters", self.input_length(), max),
            None => format!("{} characters", self.input_length()),
        }
    }

    pub fn counter_level(&self) -> CounterLevel {
        let Some(max) = self.max_length else {
            return CounterLevel::Normal;
        };
        let len = self.input_length();
        if len > max {
            CounterLevel::Over
        } else if len * 10 >= max * 9 {
            CounterLevel::Near
        } else {
            CounterLevel::Normal
        }
    }

    // ─── Editing ─────────────────────────────────────────────────

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        let idx = self.byte_index();
        self.input.insert_str(idx, text);
        self.cursor += text.chars().count();
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.input.remove(idx);
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.input_length() {
            return;
        }
        let idx = self.byte_index();
        self.input.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input_length());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input_length();
    }

    /// Input text up to the cursor, for cursor placement
    pub fn before_cursor(&self) -> &str {
        &self.input[..self.byte_index()]
    }
}

impl InputSource for AppState {
    fn read_text(&mut self) -> Result<String> {
        Ok(self.input.clone())
    }
}

impl OutputSink for AppState {
    fn show_result(&mut self, text: &str) -> Result<()> {
        self.result = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(input: &str) -> AppState {
        let mut state = AppState::new(DisplayMode::Light, Some(10));
        state.insert_str(input);
        state
    }

    #[test]
    fn test_derived_flags_on_empty_state() {
        let state = AppState::default();
        assert_eq!(state.input_length(), 0);
        assert!(!state.has_result());
        assert!(!state.can_reverse());
        assert!(!state.can_copy());
        assert_eq!(state.counter_label(), "0 characters");
    }

    #[test]
    fn test_whitespace_only_cannot_reverse() {
        let state = state_with(" \t\n ");
        assert!(state.is_blank());
        assert!(!state.can_reverse());
    }

    #[test]
    fn test_pending_blocks_reverse() {
        let mut state = state_with("abc");
        assert!(state.can_reverse());
        state.pending = true;
        assert!(!state.can_reverse());
    }

    #[test]
    fn test_counter_levels() {
        assert_eq!(state_with("12345678").counter_level(), CounterLevel::Normal);
        assert_eq!(state_with("123456789").counter_level(), CounterLevel::Near);
        assert_eq!(state_with("1234567890").counter_level(), CounterLevel::Near);
        assert_eq!(state_with("12345678901").counter_level(), CounterLevel::Over);
        assert_eq!(state_with("héllo").counter_label(), "5 / 10 characters");
    }

    #[test]
    fn test_can_copy_requires_non_empty_result() {
        let mut state = AppState::default();
        state.result = Some(String::new());
        assert!(state.has_result());
        assert!(!state.can_copy());
        state.result = Some("olleh".into());
        assert!(state.can_copy());
    }

    #[test]
    fn test_editing_multibyte() {
        let mut state = state_with("héllo");
        state.move_home();
        state.move_right();
        state.delete();
        assert_eq!(state.input, "hllo");
        state.insert_char('ë');
        assert_eq!(state.input, "hëllo");
        assert_eq!(state.before_cursor(), "hë");
        state.move_end();
        state.backspace();
        assert_eq!(state.input, "hëll");
        state.move_home();
        state.backspace();
        assert_eq!(state.input, "hëll");
    }

    #[test]
    fn test_state_serializes() {
        let state = state_with("abc");
        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(json.contains("\"theme\":\"light\""));
    }
}
