// TUI application state
//
// Wraps the interaction layer with the bits only the terminal needs: key
// debouncing, the logs panel toggle, and the quit flag.

use super::input::{Action, InputHandler};
use super::theme::Theme;
use crate::app::ports::{Clipboard, PreferenceStore};
use crate::app::{Clock, Interaction, Toasts};
use crate::logging::LogBuffer;
use crossterm::event::KeyEvent;

/// Interaction as wired for the terminal
pub type TuiInteraction = Interaction<Box<dyn PreferenceStore>, Toasts, Box<dyn Clipboard>>;

/// Main application state for the TUI
pub struct App<K: Clock> {
    pub interaction: TuiInteraction,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether the logs panel is visible
    pub show_logs: bool,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    input_handler: InputHandler,
    clock: K,
}

impl<K: Clock> App<K> {
    pub fn new(interaction: TuiInteraction, log_buffer: LogBuffer, clock: K) -> Self {
        Self {
            interaction,
            should_quit: false,
            show_logs: false,
            log_buffer,
            input_handler: InputHandler::new(),
            clock,
        }
    }

    /// Palette for the current display mode
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.interaction.state.theme)
    }

    /// Handle a key event from the terminal
    pub fn handle_key(&mut self, key: &KeyEvent) {
        let now = self.clock.now();
        if let Some(action) = self.input_handler.handle(key, now) {
            self.apply(action);
        }
    }

    /// Apply an action. Failures are already shown as toasts.
    pub fn apply(&mut self, action: Action) {
        let now = self.clock.now();
        let state = &mut self.interaction.state;
        match action {
            Action::Insert(c) => state.insert_char(c),
            Action::Backspace => state.backspace(),
            Action::Delete => state.delete(),
            Action::Left => state.move_left(),
            Action::Right => state.move_right(),
            Action::Home => state.move_home(),
            Action::End => state.move_end(),
            Action::Reverse => {
                let _ = self.interaction.request_reverse(now);
            }
            Action::Copy => {
                let _ = self.interaction.copy_result(now);
            }
            Action::ToggleTheme => {
                let _ = self.interaction.toggle_theme(now);
            }
            Action::Clear => self.interaction.clear(),
            Action::ToggleLogs => self.show_logs = !self.show_logs,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Insert pasted text at the cursor
    pub fn paste(&mut self, text: &str) {
        // Normalize line endings from bracketed paste
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.interaction.state.insert_str(&text);
    }

    /// Advance timers
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.interaction.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scheduler::ManualClock;
    use crate::app::InteractionSettings;
    use crate::prefs::{DisplayMode, MemoryPreferenceStore};
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    struct SharedClock(Rc<ManualClock>);

    impl Clock for SharedClock {
        fn now(&self) -> Instant {
            self.0.now()
        }
    }

    struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn app() -> (App<SharedClock>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let interaction = Interaction::new(
            DisplayMode::Light,
            InteractionSettings::default(),
            Box::new(MemoryPreferenceStore::default()) as Box<dyn PreferenceStore>,
            Toasts::default(),
            Box::new(NullClipboard) as Box<dyn Clipboard>,
        );
        let app = App::new(interaction, LogBuffer::new(), SharedClock(clock.clone()));
        (app, clock)
    }

    fn type_text(app: &mut App<SharedClock>, text: &str) {
        for c in text.chars() {
            app.handle_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_type_reverse_and_wait() {
        let (mut app, clock) = app();
        type_text(&mut app, "drawer");
        app.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.interaction.state.pending);

        clock.advance(Duration::from_millis(300));
        app.tick();
        assert_eq!(app.interaction.state.result.as_deref(), Some("reward"));

        let toast = app.interaction.notifier().current().expect("success toast");
        assert_eq!(toast.notice.message, "Text reversed successfully!");

        clock.advance(Duration::from_secs(3));
        app.tick();
        assert!(app.interaction.notifier().current().is_none());
    }

    #[test]
    fn test_theme_toggle_changes_palette() {
        let (mut app, _clock) = app();
        assert_eq!(app.theme().bg, Theme::light().bg);
        app.handle_key(&KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.interaction.state.theme, DisplayMode::Dark);
        assert_eq!(app.theme().bg, Theme::dark().bg);
    }

    #[test]
    fn test_paste_and_quit() {
        let (mut app, _clock) = app();
        app.paste("a\r\nb");
        assert_eq!(app.interaction.state.input, "a\nb");
        app.apply(Action::ToggleLogs);
        assert!(app.show_logs);
        app.handle_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
