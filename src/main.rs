// Reverso - reverse text in the terminal
//
// Type text, press Enter, get it back to front. The reversed result can be
// copied to the clipboard and the light/dark display mode is remembered
// between sessions.
//
// Architecture:
// - reverse: Pure reversal engine (chars or grapheme clusters)
// - app: Interaction layer (state, actions, toasts, scheduler) behind capability traits
// - prefs: Display mode persistence and ambient light/dark detection
// - tui (ratatui): Terminal front end driving the interaction layer
// - headless: One-shot reversal for pipes (`reverso reverse`)

mod app;
mod cli;
mod config;
mod headless;
mod logging;
mod prefs;
mod reverse;
mod tui;

use anyhow::Result;
use app::ports::{Clipboard, PreferenceStore};
use app::{Interaction, Toasts};
use clap::Parser;
use cli::Cli;
use config::Config;
use logging::{LogBuffer, LogTarget};
use prefs::{resolve_display_mode, EnvAmbientSignal, FilePreferenceStore, MemoryPreferenceStore};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // A broken config file is reported up front rather than silently ignored
    let mut config = Config::from_env()?;

    let log_buffer = LogBuffer::new();

    // Subcommands run headless: logs go to stderr, stdout stays clean for output
    if let Some(command) = cli.command {
        config.logging.level = command.log_level().to_string();
        let _guard = logging::init(&config.logging, LogTarget::Stderr, &log_buffer);
        return cli::run(command, &config, cli.no_persist);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // In TUI mode logs are captured to the buffer (prevents garbling the display)
    let _file_guard = logging::init(&config.logging, LogTarget::Buffer, &log_buffer);

    let prefs: Box<dyn PreferenceStore> = if cli.no_persist {
        tracing::info!("Theme preference will not be saved");
        Box::new(MemoryPreferenceStore::default())
    } else {
        Box::new(FilePreferenceStore::new(&config.prefs_path))
    };
    let theme = resolve_display_mode(prefs.as_ref(), &EnvAmbientSignal);
    let clipboard: Box<dyn Clipboard> = Box::new(tui::clipboard::terminal_clipboard());

    let interaction = Interaction::new(
        theme,
        config.interaction_settings(),
        prefs,
        Toasts::new(config.toast_duration),
        clipboard,
    );

    tracing::info!(
        mode = config.reverse_mode.as_str(),
        theme = theme.as_str(),
        "Starting TUI"
    );
    tui::run_tui(interaction, log_buffer).await?;

    tracing::info!("Shutting down");
    Ok(ExitCode::SUCCESS)
}
