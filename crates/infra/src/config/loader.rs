//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment when one exists
//! 2. Attempts to load from environment variables
//! 3. If `FIELDPULSE_LOG_LEVEL` is absent, falls back to loading from file
//! 4. Searches multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FIELDPULSE_LOG_LEVEL`: Tracing filter directive (required for env loading)
//! - `FIELDPULSE_LOG_JSON`: Emit JSON log lines (true/false)
//! - `FIELDPULSE_DEFAULT_WORKING_HOURS`: Working hours of a fresh draft
//! - `FIELDPULSE_MAX_WORKING_HOURS`: Upper bound accepted at submission
//! - `FIELDPULSE_STATS_WINDOW_DAYS`: Default statistics window in days
//! - `FIELDPULSE_MISSING_REPORT_ALERTS`: Whether missing-report alerts fire
//! - `FIELDPULSE_LOW_ACHIEVEMENT_RATE`: Low achievement threshold in percent
//! - `FIELDPULSE_LOW_ACHIEVEMENT_WINDOW_DAYS`: Days before period end the
//!   low achievement rule applies
//! - `FIELDPULSE_DEADLINE_WINDOW_DAYS`: Days before period end the deadline
//!   rule applies
//! - `FIELDPULSE_HTTP_TIMEOUT_SECS`: Timeout for external system calls
//! - `FIELDPULSE_HTTP_USER_AGENT`: User agent for external system calls
//!
//! Optional variables fall back to [`Config::default`] values.
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./fieldpulse.json` or `./fieldpulse.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use fieldpulse_domain::{Config, FieldPulseError, Result};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `FieldPulseError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - An environment variable has an invalid value
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) if is_missing_var(&e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from environment variables
///
/// `FIELDPULSE_LOG_LEVEL` must be present; every other variable is optional.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `FieldPulseError::Config` if the required variable is missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.logging.level = env_var("FIELDPULSE_LOG_LEVEL")?;
    config.logging.json = env_bool("FIELDPULSE_LOG_JSON", config.logging.json);

    let reports = &mut config.reports;
    reports.default_working_hours =
        env_parse("FIELDPULSE_DEFAULT_WORKING_HOURS", reports.default_working_hours)?;
    reports.max_working_hours =
        env_parse("FIELDPULSE_MAX_WORKING_HOURS", reports.max_working_hours)?;
    reports.statistics_window_days =
        env_parse("FIELDPULSE_STATS_WINDOW_DAYS", reports.statistics_window_days)?;

    let alerts = &mut config.alerts;
    alerts.missing_report_enabled =
        env_bool("FIELDPULSE_MISSING_REPORT_ALERTS", alerts.missing_report_enabled);
    alerts.low_achievement_rate =
        env_parse("FIELDPULSE_LOW_ACHIEVEMENT_RATE", alerts.low_achievement_rate)?;
    alerts.low_achievement_window_days =
        env_parse("FIELDPULSE_LOW_ACHIEVEMENT_WINDOW_DAYS", alerts.low_achievement_window_days)?;
    alerts.deadline_window_days =
        env_parse("FIELDPULSE_DEADLINE_WINDOW_DAYS", alerts.deadline_window_days)?;

    let integration = &mut config.integration;
    integration.request_timeout_secs =
        env_parse("FIELDPULSE_HTTP_TIMEOUT_SECS", integration.request_timeout_secs)?;
    if let Ok(agent) = std::env::var("FIELDPULSE_HTTP_USER_AGENT") {
        integration.user_agent = agent;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`find_config_file`].
///
/// # Errors
/// Returns `FieldPulseError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FieldPulseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            FieldPulseError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `FieldPulseError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(FieldPulseError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./fieldpulse.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("fieldpulse.json"),
        dir.join("fieldpulse.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

fn is_missing_var(err: &FieldPulseError) -> bool {
    matches!(err, FieldPulseError::Config(msg) if msg.starts_with(MISSING_VAR_PREFIX))
}

const MISSING_VAR_PREFIX: &str = "Missing required environment variable";

/// Get required environment variable
///
/// # Errors
/// Returns `FieldPulseError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| FieldPulseError::Config(format!("{MISSING_VAR_PREFIX}: {key}")))
}

/// Parse an optional environment variable, keeping `default` when unset.
///
/// # Errors
/// Returns `FieldPulseError::Config` if the variable is set but unparsable.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| FieldPulseError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: &[&str] = &[
        "FIELDPULSE_LOG_LEVEL",
        "FIELDPULSE_LOG_JSON",
        "FIELDPULSE_DEFAULT_WORKING_HOURS",
        "FIELDPULSE_MAX_WORKING_HOURS",
        "FIELDPULSE_STATS_WINDOW_DAYS",
        "FIELDPULSE_MISSING_REPORT_ALERTS",
        "FIELDPULSE_LOW_ACHIEVEMENT_RATE",
        "FIELDPULSE_LOW_ACHIEVEMENT_WINDOW_DAYS",
        "FIELDPULSE_DEADLINE_WINDOW_DAYS",
        "FIELDPULSE_HTTP_TIMEOUT_SECS",
        "FIELDPULSE_HTTP_USER_AGENT",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TEST_FP_BOOL_TRUE", "YES");
        std::env::set_var("TEST_FP_BOOL_FALSE", "off");

        assert!(env_bool("TEST_FP_BOOL_TRUE", false));
        assert!(!env_bool("TEST_FP_BOOL_FALSE", true));

        std::env::remove_var("TEST_FP_BOOL_MISSING");
        assert!(env_bool("TEST_FP_BOOL_MISSING", true));

        std::env::remove_var("TEST_FP_BOOL_TRUE");
        std::env::remove_var("TEST_FP_BOOL_FALSE");
    }

    #[test]
    fn test_load_from_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FIELDPULSE_LOG_LEVEL", "fieldpulse_core=debug");
        std::env::set_var("FIELDPULSE_LOG_JSON", "true");
        std::env::set_var("FIELDPULSE_MAX_WORKING_HOURS", "12");
        std::env::set_var("FIELDPULSE_DEADLINE_WINDOW_DAYS", "5");
        std::env::set_var("FIELDPULSE_HTTP_TIMEOUT_SECS", "10");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.logging.level, "fieldpulse_core=debug");
        assert!(config.logging.json);
        assert!((config.reports.max_working_hours - 12.0).abs() < f64::EPSILON);
        assert_eq!(config.alerts.deadline_window_days, 5);
        assert_eq!(config.alerts.low_achievement_window_days, 7);
        assert_eq!(config.integration.request_timeout_secs, 10);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(is_missing_var(&err), "Should be a missing variable error: {err:?}");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FIELDPULSE_LOG_LEVEL", "info");
        std::env::set_var("FIELDPULSE_STATS_WINDOW_DAYS", "a month");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, FieldPulseError::Config(_)), "Should be a Config error");
        assert!(!is_missing_var(&err));

        clear_env();
    }

    #[test]
    fn test_parse_config_formats() {
        let json = parse_config(r#"{"logging": {"level": "warn"}}"#, Path::new("c.json")).unwrap();
        assert_eq!(json.logging.level, "warn");

        let toml = parse_config("[alerts]\nlow_achievement_rate = 40.0\n", Path::new("c.toml"))
            .unwrap();
        assert!((toml.alerts.low_achievement_rate - 40.0).abs() < f64::EPSILON);

        let err = parse_config("", Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, FieldPulseError::Config(ref msg) if msg.contains("yaml")));
    }
}
