//! Configuration loader
//!
//! Loads application configuration from a file, then applies environment
//! variable overrides.
//!
//! ## Loading Strategy
//! 1. `T3TRACKER_CONFIG` names an explicit config file, which must exist
//! 2. Otherwise the first file found by [`probe_config_paths`] is used
//! 3. Without any file, built-in defaults apply
//! 4. Environment variables override individual fields
//!
//! ## Environment Variables
//! - `T3TRACKER_API_BASE_URL`: Backend base URL
//! - `T3TRACKER_API_TIMEOUT`: Request timeout in seconds
//! - `T3TRACKER_TICK_INTERVAL_MS`: Tick interval in milliseconds
//! - `T3TRACKER_FLUSH_EVERY_TICKS`: Ticks per cadence flush
//! - `T3TRACKER_CREDENTIALS_BACKEND`: `file` or `keychain`
//! - `T3TRACKER_CREDENTIALS_PATH`: Token file for the `file` backend
//! - `T3TRACKER_LOG_FORMAT`: `text` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./t3tracker.toml` or `./t3tracker.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. `<user config dir>/t3tracker/config.{toml,json}`

use std::path::{Path, PathBuf};
use std::str::FromStr;

use t3tracker_domain::{Config, CredentialBackend, LogFormat, Result, TrackerError};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "T3TRACKER_CONFIG";

/// Load configuration: file (or defaults), then environment overrides.
///
/// # Errors
/// Returns `TrackerError::Config` if:
/// - `T3TRACKER_CONFIG` names a missing file
/// - A config file exists but is not valid JSON/TOML
/// - An environment override has an invalid value
pub fn load() -> Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()).map(PathBuf::from);

    let mut config = match explicit.or_else(probe_config_paths) {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Apply environment overrides to `config`.
///
/// `lookup` resolves a variable name to its value; unset and empty
/// variables leave the field unchanged.
///
/// # Errors
/// Returns `TrackerError::Config` if a variable holds an invalid value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = get("T3TRACKER_API_BASE_URL") {
        config.api.base_url = base_url;
    }
    if let Some(value) = get("T3TRACKER_API_TIMEOUT") {
        config.api.timeout_seconds = parse_env("T3TRACKER_API_TIMEOUT", &value)?;
    }
    if let Some(value) = get("T3TRACKER_TICK_INTERVAL_MS") {
        config.tracking.tick_interval_ms = parse_env("T3TRACKER_TICK_INTERVAL_MS", &value)?;
    }
    if let Some(value) = get("T3TRACKER_FLUSH_EVERY_TICKS") {
        config.tracking.flush_every_ticks = parse_env("T3TRACKER_FLUSH_EVERY_TICKS", &value)?;
    }
    if let Some(value) = get("T3TRACKER_CREDENTIALS_BACKEND") {
        config.credentials.backend = parse_env::<CredentialBackend>("T3TRACKER_CREDENTIALS_BACKEND", &value)?;
    }
    if let Some(path) = get("T3TRACKER_CREDENTIALS_PATH") {
        config.credentials.path = path;
    }
    if let Some(value) = get("T3TRACKER_LOG_FORMAT") {
        config.logging.format = parse_env::<LogFormat>("T3TRACKER_LOG_FORMAT", &value)?;
    }

    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TrackerError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TrackerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TrackerError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TrackerError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `TrackerError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TrackerError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TrackerError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TrackerError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd, &["t3tracker", "config"]));
    }

    if let Some(config_dir) = dirs::config_dir() {
        candidates.extend(candidate_files(&config_dir.join("t3tracker"), &["config"]));
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn candidate_files(dir: &Path, stems: &[&str]) -> Vec<PathBuf> {
    stems
        .iter()
        .flat_map(|stem| [dir.join(format!("{stem}.toml")), dir.join(format!("{stem}.json"))])
        .collect()
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| TrackerError::Config(format!("Invalid value for {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::{Builder, TempDir};

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_all_fields() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("T3TRACKER_API_BASE_URL", "https://t3.example.com/api"),
                ("T3TRACKER_API_TIMEOUT", "12"),
                ("T3TRACKER_TICK_INTERVAL_MS", "500"),
                ("T3TRACKER_FLUSH_EVERY_TICKS", "120"),
                ("T3TRACKER_CREDENTIALS_BACKEND", "Keychain"),
                ("T3TRACKER_CREDENTIALS_PATH", "/tmp/t3.toml"),
                ("T3TRACKER_LOG_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://t3.example.com/api");
        assert_eq!(config.api.timeout_seconds, 12);
        assert_eq!(config.tracking.tick_interval_ms, 500);
        assert_eq!(config.tracking.flush_every_ticks, 120);
        assert_eq!(config.credentials.backend, CredentialBackend::Keychain);
        assert_eq!(config.credentials.path, "/tmp/t3.toml");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_env_leaves_defaults() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[("T3TRACKER_API_BASE_URL", "  ")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_env_number() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, env(&[("T3TRACKER_API_TIMEOUT", "soon")]))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Config(msg) if msg.contains("T3TRACKER_API_TIMEOUT")));
    }

    #[test]
    fn test_invalid_env_backend() {
        let mut config = Config::default();
        let err = apply_env_overrides(
            &mut config,
            env(&[("T3TRACKER_CREDENTIALS_BACKEND", "vault")]),
        )
        .unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[api]
base_url = "https://t3.example.com/api"

[tracking]
flush_every_ticks = 30
"#;

        let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_from_file(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.base_url, "https://t3.example.com/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.tracking.flush_every_ticks, 30);
        assert_eq!(config.tracking.tick_interval_ms, 1_000);
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{ "credentials": { "backend": "keychain" } }"#;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();

        let config = load_from_file(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.credentials.backend, CredentialBackend::Keychain);
        assert_eq!(config.credentials.path, "credentials.toml");
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"{ "this is": "not valid json" "#).unwrap();

        let result = load_from_file(Some(temp_file.path().to_path_buf()));
        assert!(matches!(result, Err(TrackerError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_candidate_order() {
        let dir = TempDir::new().unwrap();
        let candidates = candidate_files(dir.path(), &["t3tracker", "config"]);
        let names: Vec<_> = candidates
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["t3tracker.toml", "t3tracker.json", "config.toml", "config.json"]);
    }
}
