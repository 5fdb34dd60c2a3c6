// CLI module - command-line argument parsing and handlers
//
// With no subcommand reverso starts the TUI. Subcommands:
// - reverse [TEXT]: One-shot reversal from argv or stdin
// - theme [show|light|dark|toggle]: Read or change the stored display mode
// - config --show|--reset|--path: Inspect or regenerate the config file

use crate::app::notify::StderrNotifier;
use crate::app::ports::{InputSource, OutputSink, PreferenceStore};
use crate::config::{Config, VERSION};
use crate::headless::{self, ArgSource, JsonSink, ReaderSource, TextSink};
use crate::prefs::{
    resolve_display_mode, save_display_mode, AmbientSignal, DisplayMode, EnvAmbientSignal,
    FilePreferenceStore, MemoryPreferenceStore,
};
use crate::reverse::ReverseMode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::process::ExitCode;

/// Exit code for refused input (blank or too long)
const EXIT_REFUSED: u8 = 2;

/// Reverso - reverse text in the terminal
#[derive(Parser)]
#[command(name = "reverso")]
#[command(version = VERSION)]
#[command(about = "Reverse text in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Keep the theme preference in memory only
    #[arg(long, global = true)]
    pub no_persist: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reverse TEXT (or stdin) and print the result
    Reverse {
        /// Text to reverse; read from stdin when omitted
        text: Option<String>,

        /// Keep user-perceived characters (accents, emoji sequences) intact
        #[arg(long)]
        graphemes: bool,

        /// Print a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show or change the display mode
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}

impl Commands {
    /// Headless commands log at warn unless RUST_LOG says otherwise
    pub fn log_level(&self) -> &'static str {
        match self {
            Commands::Reverse { .. } => "warn",
            Commands::Theme { .. } | Commands::Config { .. } => "info",
        }
    }
}

/// Run a subcommand to completion. With `no_persist` nothing is written
/// to the preference file.
pub fn run(command: Commands, config: &Config, no_persist: bool) -> Result<ExitCode> {
    match command {
        Commands::Reverse {
            text,
            graphemes,
            json,
        } => handle_reverse(text, graphemes, json, config).map(ExitCode::from),
        Commands::Theme { action } => handle_theme(action, config, no_persist),
        Commands::Config { show, reset, path } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show(config)
            } else if reset {
                handle_config_reset()
            } else {
                // No flag provided, show help
                println!("Usage: reverso config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn handle_reverse(
    text: Option<String>,
    graphemes: bool,
    json: bool,
    config: &Config,
) -> Result<u8> {
    let mut settings = config.interaction_settings();
    if graphemes {
        settings.mode = ReverseMode::Graphemes;
    }

    let mut input: Box<dyn InputSource> = match text {
        Some(text) => Box::new(ArgSource(text)),
        None => Box::new(ReaderSource::stdin()),
    };
    let stdout = std::io::stdout().lock();
    let mut output: Box<dyn OutputSink> = if json {
        Box::new(JsonSink::new(stdout, settings.mode))
    } else {
        Box::new(TextSink::new(stdout))
    };

    let reversed = headless::reverse_once(
        input.as_mut(),
        output.as_mut(),
        &mut StderrNotifier,
        &settings,
    )?;
    Ok(reverse_exit_status(reversed))
}

/// 0 when a result was printed, 2 when the input was refused
fn reverse_exit_status(reversed: bool) -> u8 {
    if reversed {
        0
    } else {
        EXIT_REFUSED
    }
}

fn handle_theme(action: ThemeAction, config: &Config, no_persist: bool) -> Result<ExitCode> {
    let mut store: Box<dyn PreferenceStore> = if no_persist {
        Box::new(MemoryPreferenceStore::default())
    } else {
        Box::new(FilePreferenceStore::new(&config.prefs_path))
    };

    let mode = apply_theme_action(action, store.as_mut(), &EnvAmbientSignal)
        .with_context(|| format!("Could not save theme to {}", config.prefs_path.display()))?;
    if no_persist && action != ThemeAction::Show {
        eprintln!("Not saved (--no-persist)");
    }
    println!("{}", mode.as_str());
    Ok(ExitCode::SUCCESS)
}

/// Resolve the current mode and, unless only showing it, store the new one
fn apply_theme_action(
    action: ThemeAction,
    store: &mut dyn PreferenceStore,
    ambient: &dyn AmbientSignal,
) -> Result<DisplayMode> {
    let current = resolve_display_mode(store, ambient);
    let next = match action {
        ThemeAction::Show => return Ok(current),
        ThemeAction::Light => DisplayMode::Light,
        ThemeAction::Dark => DisplayMode::Dark,
        ThemeAction::Toggle => current.toggled(),
    };
    save_display_mode(store, next)?;
    Ok(next)
}

fn handle_config_path() -> Result<ExitCode> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: &Config) -> Result<ExitCode> {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config_reset() -> Result<ExitCode> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Config::default().to_toml() is the single source of truth
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(ExitCode::SUCCESS)
}
