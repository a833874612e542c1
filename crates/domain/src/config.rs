//! Application configuration structures
//!
//! Every section has defaults so a partial JSON/TOML file only needs to name
//! the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEADLINE_WINDOW_DAYS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STATISTICS_WINDOW_DAYS,
    DEFAULT_USER_AGENT, DEFAULT_WORKING_HOURS, LOW_ACHIEVEMENT_RATE, LOW_ACHIEVEMENT_WINDOW_DAYS,
    MAX_WORKING_HOURS, MISSING_REPORT_ALERT_TTL_DAYS,
};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reports: ReportSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub integration: IntegrationSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report lifecycle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Working hours stamped on a fresh draft
    pub default_working_hours: f64,
    /// Upper bound accepted at submission
    pub max_working_hours: f64,
    /// Window used when statistics are requested without a period
    pub statistics_window_days: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_working_hours: DEFAULT_WORKING_HOURS,
            max_working_hours: MAX_WORKING_HOURS,
            statistics_window_days: DEFAULT_STATISTICS_WINDOW_DAYS,
        }
    }
}

/// Alert rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub missing_report_enabled: bool,
    /// Rates strictly below this count as low achievement
    pub low_achievement_rate: f64,
    pub low_achievement_window_days: i64,
    pub deadline_window_days: i64,
    pub missing_report_ttl_days: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            missing_report_enabled: true,
            low_achievement_rate: LOW_ACHIEVEMENT_RATE,
            low_achievement_window_days: LOW_ACHIEVEMENT_WINDOW_DAYS,
            deadline_window_days: DEADLINE_WINDOW_DAYS,
            missing_report_ttl_days: MISSING_REPORT_ALERT_TTL_DAYS,
        }
    }
}

/// Outbound HTTP settings for external systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `fieldpulse_core=debug`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
