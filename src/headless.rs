//! One-shot reversal for scripts and pipes
//!
//! Same policy as the TUI (blank input is refused, engine panics are
//! caught) with stdin/argv as the input source and stdout as the sink.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::time::Instant;

use crate::app::ports::{InputSource, NotificationSurface, OutputSink};
use crate::app::{check_input, guarded_reverse, InteractionSettings};
use crate::reverse::{reverse_with, ReverseMode};

/// Text given on the command line
#[derive(Debug)]
pub struct ArgSource(pub String);

impl InputSource for ArgSource {
    fn read_text(&mut self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Everything on a reader, minus one trailing line break
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl ReaderSource<std::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin())
    }
}

impl<R: Read> InputSource for ReaderSource<R> {
    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .context("Failed to read input")?;
        // `echo hello | reverso reverse` should print "olleh", not "\nolleh"
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }
}

/// Plain text, one result per line
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for TextSink<W> {
    fn show_result(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text).context("Failed to write output")
    }
}

#[derive(Serialize)]
struct JsonResult<'a> {
    output: &'a str,
    length: usize,
    mode: ReverseMode,
}

/// One JSON object per result
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    out: W,
    mode: ReverseMode,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, mode: ReverseMode) -> Self {
        Self { out, mode }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for JsonSink<W> {
    fn show_result(&mut self, text: &str) -> Result<()> {
        let record = JsonResult {
            output: text,
            length: text.chars().count(),
            mode: self.mode,
        };
        serde_json::to_writer(&mut self.out, &record).context("Failed to encode output")?;
        writeln!(self.out).context("Failed to write output")
    }
}

/// Read, validate, reverse, write. Returns `false` when the input was
/// refused or the engine failed; the reason has gone to `notifier`.
pub fn reverse_once(
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
    notifier: &mut dyn NotificationSurface,
    settings: &InteractionSettings,
) -> Result<bool> {
    let now = Instant::now();
    let text = input.read_text()?;

    if let Err(e) = check_input(&text, settings.max_length) {
        notifier.notify(e.notice(), now);
        return Ok(false);
    }

    match guarded_reverse(reverse_with, &text, settings.mode) {
        Ok(reversed) => {
            output.show_result(&reversed)?;
            tracing::debug!(chars = text.chars().count(), "Text reversed");
            Ok(true)
        }
        Err(e) => {
            notifier.notify(e.notice(), now);
            Ok(false)
        }
    }
}
