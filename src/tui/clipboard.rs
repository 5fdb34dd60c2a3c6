//! Clipboard writers
//!
//! `SystemClipboard` uses the `arboard` crate for cross-platform support
//! (Windows, macOS, Linux). It fails on headless Linux or over SSH, where the
//! OSC 52 escape sequence still reaches the terminal emulator, so the TUI
//! wires both together through `FallbackClipboard`.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Write;

use crate::app::ports::Clipboard;

/// System clipboard via arboard
///
/// The clipboard is created fresh each time to avoid holding resources.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}

/// Terminal clipboard via OSC 52 (`ESC ] 52 ; c ; <base64> BEL`)
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// Build the OSC 52 sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .context("Failed to write OSC 52 sequence")?;
        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}

/// Try `primary`, then `fallback`
#[derive(Debug)]
pub struct FallbackClipboard<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> FallbackClipboard<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: Clipboard, B: Clipboard> Clipboard for FallbackClipboard<A, B> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        match self.primary.set_text(text) {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                tracing::debug!("Primary clipboard failed, trying fallback: {:#}", primary_err);
                self.fallback
                    .set_text(text)
                    .with_context(|| format!("Clipboard unavailable ({:#})", primary_err))
            }
        }
    }
}

/// The default chain: system clipboard, then OSC 52 on stdout
pub fn terminal_clipboard() -> FallbackClipboard<SystemClipboard, Osc52Clipboard<std::io::Stdout>> {
    FallbackClipboard::new(SystemClipboard, Osc52Clipboard::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Failing;

    impl Clipboard for Failing {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Err(anyhow!("no display"))
        }
    }

    #[derive(Default)]
    struct Recording(Vec<String>);

    impl Clipboard for Recording {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("olleh"), "\x1b]52;c;b2xsZWg=\x07");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_osc52_writes_to_terminal() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.set_text("hi").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let mut chain = FallbackClipboard::new(Recording::default(), Recording::default());
        chain.set_text("abc").unwrap();
        assert_eq!(chain.primary.0, vec!["abc"]);
        assert!(chain.fallback.0.is_empty());
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let mut chain = FallbackClipboard::new(Failing, Recording::default());
        chain.set_text("abc").unwrap();
        assert_eq!(chain.fallback.0, vec!["abc"]);
    }

    #[test]
    fn test_both_failing_reports_error() {
        let mut chain = FallbackClipboard::new(Failing, Failing);
        let err = chain.set_text("abc").unwrap_err();
        assert!(format!("{:#}", err).contains("no display"));
    }
}
