// Key handling
//
// Maps terminal key events to editor and app actions. Action keys are
// debounced: some terminals never send Release events and auto-repeat a
// held Enter, which would otherwise queue reversal after reversal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Debounce window for action keys
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Reverse,
    Copy,
    ToggleTheme,
    Clear,
    ToggleLogs,
    Quit,
}

impl Action {
    /// Actions that fire once per press rather than repeating
    pub fn is_debounced(&self) -> bool {
        matches!(
            self,
            Action::Reverse | Action::Copy | Action::ToggleTheme | Action::Clear | Action::ToggleLogs
        )
    }
}

/// Translate a key event into an action
pub fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('y') => Some(Action::Copy),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('l') => Some(Action::Clear),
            KeyCode::Char('a') => Some(Action::Home),
            KeyCode::Char('e') => Some(Action::End),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Reverse),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Home => Some(Action::Home),
        KeyCode::End => Some(Action::End),
        KeyCode::F(2) => Some(Action::ToggleLogs),
        KeyCode::Tab => Some(Action::Insert('\t')),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}

/// Drops repeats of debounced actions that arrive too quickly
#[derive(Debug, Default)]
pub struct InputHandler {
    last_triggered: HashMap<Action, Instant>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the action if it should run now
    pub fn handle(&mut self, key: &KeyEvent, now: Instant) -> Option<Action> {
        let action = map_key(key)?;
        if !action.is_debounced() {
            return Some(action);
        }

        if let Some(last) = self.last_triggered.get(&action) {
            if now.duration_since(*last) < ACTION_DEBOUNCE {
                return None;
            }
        }
        self.last_triggered.insert(action, now);
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Action::Reverse));
        assert_eq!(map_key(&key(KeyCode::Char('y'))), Some(Action::Insert('y')));
        assert_eq!(map_key(&ctrl('y')), Some(Action::Copy));
        assert_eq!(map_key(&ctrl('t')), Some(Action::ToggleTheme));
        assert_eq!(map_key(&ctrl('l')), Some(Action::Clear));
        assert_eq!(map_key(&ctrl('c')), Some(Action::Quit));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Insert('A'))
        );
        assert_eq!(map_key(&key(KeyCode::F(5))), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = key(KeyCode::Enter);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(&event), None);
    }

    #[test]
    fn test_action_keys_debounced() {
        let mut handler = InputHandler::new();
        let start = Instant::now();
        let enter = key(KeyCode::Enter);

        assert_eq!(handler.handle(&enter, start), Some(Action::Reverse));
        assert_eq!(handler.handle(&enter, start + Duration::from_millis(50)), None);
        assert_eq!(
            handler.handle(&enter, start + Duration::from_millis(200)),
            Some(Action::Reverse)
        );
    }

    #[test]
    fn test_typing_not_debounced() {
        let mut handler = InputHandler::new();
        let now = Instant::now();
        let a = key(KeyCode::Char('a'));
        assert_eq!(handler.handle(&a, now), Some(Action::Insert('a')));
        assert_eq!(handler.handle(&a, now), Some(Action::Insert('a')));
    }
}
