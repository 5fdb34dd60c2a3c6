//! Transient notifications
//!
//! `Toasts` is the surface the TUI renders: one toast at a time, replaced by
//! newer ones, dismissed by the scheduler once its duration has elapsed.
//! `StderrNotifier` is the headless counterpart.

use std::io::Write;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::ports::NotificationSurface;
use super::scheduler::{Scheduler, TimerHandle};

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
            Self::Info => "i",
        }
    }
}

/// A message waiting to be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    #[cfg(test)]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    #[cfg(test)]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Text as rendered, glyph first
    pub fn display(&self) -> String {
        format!("{} {}", self.kind.glyph(), self.message)
    }
}

/// A toast currently on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    dismiss: TimerHandle,
}

/// Single-slot toast surface with scheduled auto-dismiss
#[derive(Debug)]
pub struct Toasts {
    current: Option<Toast>,
    duration: Duration,
    timers: Scheduler<()>,
}

impl Toasts {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            timers: Scheduler::new(),
        }
    }

    /// Toast to render, if any
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Dismiss immediately
    pub fn dismiss(&mut self) {
        if let Some(toast) = self.current.take() {
            self.timers.cancel(toast.dismiss);
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl NotificationSurface for Toasts {
    fn notify(&mut self, notice: Notice, now: Instant) {
        self.dismiss();
        let dismiss = self.timers.schedule(now + self.duration, ());
        self.current = Some(Toast {
            notice,
            dismiss,
        });
    }

    fn tick(&mut self, now: Instant) {
        // Only one timer is ever live, so anything due belongs to `current`
        if self.timers.next_deadline().is_some_and(|at| at <= now) {
            self.timers.due(now);
            self.current = None;
        }
    }
}

/// Writes notifications to stderr, one per line
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl NotificationSurface for StderrNotifier {
    fn notify(&mut self, notice: Notice, _now: Instant) {
        let _ = writeln!(std::io::stderr(), "{}", notice.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scheduler::{Clock, ManualClock};

    #[test]
    fn test_toast_dismissed_after_three_seconds() {
        let clock = ManualClock::new();
        let mut toasts = Toasts::default();
        toasts.notify(Notice::success("Copied to clipboard!"), clock.now());

        clock.advance(Duration::from_millis(2999));
        toasts.tick(clock.now());
        assert!(toasts.current().is_some());

        clock.advance(Duration::from_millis(1));
        toasts.tick(clock.now());
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_newer_toast_replaces_and_restarts_timer() {
        let clock = ManualClock::new();
        let mut toasts = Toasts::default();
        toasts.notify(Notice::info("first"), clock.now());

        clock.advance(Duration::from_secs(2));
        toasts.notify(Notice::warning("second"), clock.now());

        // The first toast's deadline passes without dismissing the second
        clock.advance(Duration::from_secs(2));
        toasts.tick(clock.now());
        let toast = toasts.current().expect("second toast still visible");
        assert_eq!(toast.notice.message, "second");
        assert_eq!(toast.notice.kind, ToastKind::Warning);

        clock.advance(Duration::from_secs(1));
        toasts.tick(clock.now());
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_manual_dismiss() {
        let clock = ManualClock::new();
        let mut toasts = Toasts::new(Duration::from_millis(500));
        toasts.notify(Notice::error("boom"), clock.now());
        toasts.dismiss();
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_display_includes_glyph() {
        assert_eq!(Notice::error("Failed to copy text").display(), "✗ Failed to copy text");
        assert_eq!(Notice::success("ok").display(), "✓ ok");
    }
}
