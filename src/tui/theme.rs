// Color palettes for the TUI
//
// One palette per display mode. Every widget takes its colors from here so
// toggling the theme is a single field change on the app state.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::app::{CounterLevel, ToastKind};
use crate::prefs::DisplayMode;

/// Complete palette with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Title and status
    pub title: Color,
    pub status_bar: Color,
    pub muted: Color,

    // Result panel
    pub result: Color,
    pub placeholder: Color,

    // Character counter
    pub counter_normal: Color,
    pub counter_near: Color,
    pub counter_over: Color,

    // Toasts
    pub toast_success: Color,
    pub toast_warning: Color,
    pub toast_error: Color,
    pub toast_info: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Theme {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self::light(),
            DisplayMode::Dark => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 32),
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            status_bar: Color::Green,
            muted: Color::DarkGray,

            result: Color::LightMagenta,
            placeholder: Color::DarkGray,

            counter_normal: Color::Gray,
            counter_near: Color::Yellow,
            counter_over: Color::Red,

            toast_success: Color::Green,
            toast_warning: Color::Yellow,
            toast_error: Color::Red,
            toast_info: Color::LightBlue,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            border_type: BorderType::Rounded,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            muted: Color::Gray,

            result: Color::Magenta,
            placeholder: Color::Gray,

            counter_normal: Color::DarkGray,
            counter_near: Color::Rgb(184, 134, 11), // Dark goldenrod
            counter_over: Color::Red,

            toast_success: Color::Green,
            toast_warning: Color::Rgb(184, 134, 11),
            toast_error: Color::Red,
            toast_info: Color::Blue,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn toast_color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.toast_success,
            ToastKind::Warning => self.toast_warning,
            ToastKind::Error => self.toast_error,
            ToastKind::Info => self.toast_info,
        }
    }

    pub fn counter_color(&self, level: CounterLevel) -> Color {
        match level {
            CounterLevel::Normal => self.counter_normal,
            CounterLevel::Near => self.counter_near,
            CounterLevel::Over => self.counter_over,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
