//! Configuration tests
//!
//! These guard the config file format: anything `to_toml` writes must parse
//! back into the same effective configuration.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the default template parses back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.reverse_mode = ReverseMode::Graphemes;
    config.max_length = None;
    config.result_delay = Duration::ZERO;
    config.toast_duration = Duration::from_millis(1500);
    config.prefs_path = PathBuf::from("/tmp/with \"quotes\"/prefs.toml");
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).expect("custom config parses");
    let loaded = Config::from_sources(file, no_env);

    assert_eq!(loaded.reverse_mode, ReverseMode::Graphemes);
    assert_eq!(loaded.max_length, None);
    assert_eq!(loaded.result_delay, Duration::ZERO);
    assert_eq!(loaded.toast_duration, Duration::from_millis(1500));
    assert_eq!(loaded.prefs_path, config.prefs_path);
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_config_roundtrip_unusual_paths() {
    let mut config = Config::default();
    // Soft hyphen, backslash, quote and a control character: all need TOML escapes
    config.prefs_path = PathBuf::from("/home/ja\u{ad}ne/C:\\prefs \"x\"\t.toml");
    config.logging.file_dir = PathBuf::from("/var/log/r\u{e9}verso\u{7f}");
    config.logging.file_prefix = "rev\"so".to_string();

    let toml_str = config.to_toml();
    let file: FileConfig = toml::from_str(&toml_str)
        .unwrap_or_else(|e| panic!("unparseable:\n{}\n{}", toml_str, e));
    let loaded = Config::from_sources(file, no_env);

    assert_eq!(loaded.prefs_path, config.prefs_path);
    assert_eq!(loaded.logging.file_dir, config.logging.file_dir);
    assert_eq!(loaded.logging.file_prefix, "rev\"so");
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config.reverse_mode, ReverseMode::Chars);
    assert_eq!(config.max_length, Some(500));
    assert_eq!(config.result_delay, Duration::from_millis(300));
    assert_eq!(config.toast_duration, Duration::from_secs(3));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
reverse_mode = "chars"
max_length = 100
prefs_path = "/from/file.toml"
"#,
    )
    .unwrap();
    let env = env_from(&[
        ("REVERSO_MODE", "graphemes"),
        ("REVERSO_MAX_LENGTH", "0"),
        ("REVERSO_PREFS", "/from/env.toml"),
        ("REVERSO_LOG_DIR", "/var/log/reverso"),
    ]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.reverse_mode, ReverseMode::Graphemes);
    assert_eq!(config.max_length, None);
    assert_eq!(config.prefs_path, PathBuf::from("/from/env.toml"));
    assert_eq!(config.logging.file_dir, PathBuf::from("/var/log/reverso"));
}

#[test]
fn test_unparseable_env_number_falls_through_to_file() {
    let file: FileConfig = toml::from_str("max_length = 42").unwrap();
    let config = Config::from_sources(file, env_from(&[("REVERSO_MAX_LENGTH", "lots")]));
    assert_eq!(config.max_length, Some(42));
}

#[test]
fn test_unknown_mode_falls_back_to_chars() {
    let file: FileConfig = toml::from_str("reverse_mode = \"words\"").unwrap();
    assert_eq!(Config::from_sources(file, no_env).reverse_mode, ReverseMode::Chars);
}

#[test]
fn test_logging_section() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "debug"
file_rotation = "never"
file_prefix = "rev"
"#,
    )
    .unwrap();
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "rev");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_logging_unknown_values_keep_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "LOUD"
file_rotation = "weekly"
file_prefix = "  "
"#,
    )
    .unwrap();
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.file_prefix, "reverso");

    let file: FileConfig = toml::from_str("[logging]\nlevel = \" Warn \"").unwrap();
    assert_eq!(Config::from_sources(file, no_env).logging.level, "warn");
}

#[test]
fn test_load_file_config() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(Config::load_file_config(&missing).is_ok());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "max_length = \"many").unwrap();
    let err = Config::load_file_config(&broken).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_interaction_settings() {
    let mut config = Config::default();
    config.reverse_mode = ReverseMode::Graphemes;
    let settings = config.interaction_settings();
    assert_eq!(settings.mode, ReverseMode::Graphemes);
    assert_eq!(settings.max_length, Some(500));
    assert_eq!(settings.result_delay, Duration::from_millis(300));
}
