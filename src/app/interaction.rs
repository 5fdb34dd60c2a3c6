//! User actions and the policy around the reversal engine
//!
//! Each action validates, runs, and reports through the notification
//! surface. Errors are returned too so callers can log them, but nothing
//! here is fatal.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use super::error::InteractionError;
use super::notify::Notice;
use super::ports::{Clipboard, InputSource, NotificationSurface, OutputSink, PreferenceStore};
use super::scheduler::{Scheduler, TimerHandle};
use super::state::AppState;
use crate::prefs::{save_display_mode, DisplayMode};
use crate::reverse::{reverse_with, ReverseMode};

/// Reversal function used by an [`Interaction`]
pub type Engine = fn(&str, ReverseMode) -> String;

/// Knobs taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSettings {
    pub mode: ReverseMode,
    /// Cosmetic pause between the request and the result
    pub result_delay: Duration,
    pub max_length: Option<usize>,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            mode: ReverseMode::Chars,
            result_delay: Duration::from_millis(300),
            max_length: Some(500),
        }
    }
}

/// Reject input the engine should never see
pub fn check_input(text: &str, max_length: Option<usize>) -> Result<(), InteractionError> {
    if text.trim().is_empty() {
        return Err(InteractionError::EmptyInput);
    }
    if let Some(max) = max_length {
        if text.chars().count() > max {
            return Err(InteractionError::TooLong { max });
        }
    }
    Ok(())
}

/// Run `engine`, turning a panic into [`InteractionError::Engine`]
pub fn guarded_reverse(
    engine: Engine,
    text: &str,
    mode: ReverseMode,
) -> Result<String, InteractionError> {
    panic::catch_unwind(AssertUnwindSafe(|| engine(text, mode))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        InteractionError::Engine(message)
    })
}

#[derive(Debug)]
enum Deferred {
    /// Show the reversal of the captured input
    Reveal(String),
}

/// Interactive session: state plus the collaborators it reports to
pub struct Interaction<P, N, C> {
    pub state: AppState,
    settings: InteractionSettings,
    scheduler: Scheduler<Deferred>,
    pending_reveal: Option<TimerHandle>,
    prefs: P,
    notifier: N,
    clipboard: C,
    engine: Engine,
}

impl<P, N, C> Interaction<P, N, C>
where
    P: PreferenceStore,
    N: NotificationSurface,
    C: Clipboard,
{
    pub fn new(
        theme: DisplayMode,
        settings: InteractionSettings,
        prefs: P,
        notifier: N,
        clipboard: C,
    ) -> Self {
        Self {
            state: AppState::new(theme, settings.max_length),
            settings,
            scheduler: Scheduler::new(),
            pending_reveal: None,
            prefs,
            notifier,
            clipboard,
            engine: reverse_with,
        }
    }

    /// Swap the reversal function
    #[cfg(test)]
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[cfg(test)]
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    #[cfg(test)]
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    fn report(&mut self, err: InteractionError, now: Instant) -> InteractionError {
        match &err {
            InteractionError::EmptyInput | InteractionError::TooLong { .. } => {
                tracing::debug!("Reverse rejected: {}", err)
            }
            other => tracing::warn!("{:?}", other),
        }
        self.notifier.notify(err.notice(), now);
        err
    }

    /// Validate the input and schedule its reversal
    pub fn request_reverse(&mut self, now: Instant) -> Result<(), InteractionError> {
        let text = self.state.read_text().unwrap_or_default();
        if let Err(e) = check_input(&text, self.settings.max_length) {
            return Err(self.report(e, now));
        }

        // A newer request supersedes one still waiting
        if let Some(handle) = self.pending_reveal.take() {
            self.scheduler.cancel(handle);
        }
        self.state.pending = true;

        if self.settings.result_delay.is_zero() {
            return self.reveal(text, now);
        }
        self.pending_reveal = Some(
            self.scheduler
                .schedule(now + self.settings.result_delay, Deferred::Reveal(text)),
        );
        Ok(())
    }

    fn reveal(&mut self, text: String, now: Instant) -> Result<(), InteractionError> {
        self.pending_reveal = None;
        self.state.pending = false;

        let output = match guarded_reverse(self.engine, &text, self.settings.mode) {
            Ok(output) => output,
            Err(e) => return Err(self.report(e, now)),
        };
        if let Err(e) = self.state.show_result(&output) {
            return Err(self.report(InteractionError::Engine(e.to_string()), now));
        }

        tracing::info!(
            chars = text.chars().count(),
            mode = self.settings.mode.as_str(),
            "Text reversed"
        );
        self.notifier
            .notify(Notice::success("Text reversed successfully!"), now);
        Ok(())
    }

    /// Fire whatever is due: pending reveals and toast expiry
    pub fn tick(&mut self, now: Instant) {
        for deferred in self.scheduler.due(now) {
            match deferred {
                // Already reported through the notifier
                Deferred::Reveal(text) => {
                    let _ = self.reveal(text, now);
                }
            }
        }
        self.notifier.tick(now);
    }

    /// Copy the displayed result
    pub fn copy_result(&mut self, now: Instant) -> Result<(), InteractionError> {
        let Some(result) = self.state.result.clone().filter(|r| !r.is_empty()) else {
            self.notifier.notify(Notice::info("Nothing to copy yet"), now);
            return Ok(());
        };

        match self.clipboard.set_text(&result) {
            Ok(()) => {
                tracing::debug!(chars = result.chars().count(), "Result copied");
                self.notifier.notify(Notice::success("Copied to clipboard!"), now);
                Ok(())
            }
            Err(e) => Err(self.report(InteractionError::Clipboard(e), now)),
        }
    }

    /// Flip light/dark and persist the choice. The theme changes for this
    /// session even if saving fails.
    pub fn toggle_theme(&mut self, now: Instant) -> Result<DisplayMode, InteractionError> {
        let mode = self.state.theme.toggled();
        self.state.theme = mode;

        if let Err(e) = save_display_mode(&mut self.prefs, mode) {
            return Err(self.report(InteractionError::Preference(e), now));
        }

        tracing::info!(theme = mode.as_str(), "Theme switched");
        self.notifier
            .notify(Notice::info(format!("Switched to {} mode", mode.as_str())), now);
        Ok(mode)
    }

    /// Empty the input and result, dropping any pending reveal
    pub fn clear(&mut self) {
        if let Some(handle) = self.pending_reveal.take() {
            self.scheduler.cancel(handle);
        }
        self.state.input.clear();
        self.state.cursor = 0;
        self.state.result = None;
        self.state.pending = false;
    }
}
