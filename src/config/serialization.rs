//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the full config file, commented, with current values
    pub fn to_toml(&self) -> String {
        let max_length = self.max_length.unwrap_or(0);
        let logging = &self.logging;

        format!(
            r#"# reverso configuration
# Precedence: environment variables > this file > built-in defaults

# Unit of reversal: "chars" (Unicode scalar values) or "graphemes"
# (user-perceived characters; keeps accents and emoji sequences intact)
# Env: REVERSO_MODE
reverse_mode = "{reverse_mode}"

# Maximum input length in characters (0 = unlimited)
# Env: REVERSO_MAX_LENGTH
max_length = {max_length}

# Pause before the reversed text appears, in milliseconds (0 = instant)
result_delay_ms = {result_delay_ms}

# How long notifications stay on screen, in milliseconds
toast_duration_ms = {toast_duration_ms}

# Where the light/dark preference is stored
# Env: REVERSO_PREFS
prefs_path = {prefs_path}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides)
level = {level}
# Write JSON logs to rotating files
file_enabled = {file_enabled}
# Env: REVERSO_LOG_DIR
file_dir = {file_dir}
# hourly, daily, never
file_rotation = "{file_rotation}"
file_prefix = {file_prefix}
"#,
            reverse_mode = self.reverse_mode.as_str(),
            max_length = max_length,
            result_delay_ms = self.result_delay.as_millis(),
            toast_duration_ms = self.toast_duration.as_millis(),
            prefs_path = toml_string(&self.prefs_path.display().to_string()),
            level = toml_string(&logging.level),
            file_enabled = logging.file_enabled,
            file_dir = toml_string(&logging.file_dir.display().to_string()),
            file_rotation = logging.file_rotation.as_str(),
            file_prefix = toml_string(&logging.file_prefix),
        )
    }
}

/// Quote and escape a string value the way TOML expects
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
