//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Report defaults
pub const DEFAULT_WORKING_HOURS: f64 = 8.0;
pub const MAX_WORKING_HOURS: f64 = 24.0;
pub const DEFAULT_STATISTICS_WINDOW_DAYS: u32 = 30;

// Alert thresholds
pub const LOW_ACHIEVEMENT_RATE: f64 = 50.0;
pub const LOW_ACHIEVEMENT_WINDOW_DAYS: i64 = 7;
pub const DEADLINE_WINDOW_DAYS: i64 = 3;
pub const MISSING_REPORT_ALERT_TTL_DAYS: i64 = 7;

// Achievement bands
pub const ON_TRACK_RATE: f64 = 80.0;
pub const ACHIEVED_RATE: f64 = 100.0;

// Dashboard
pub const DASHBOARD_ALERT_LIMIT: usize = 5;
pub const DASHBOARD_RECENT_DAYS: i64 = 7;

// Integration
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "FieldPulse/0.1";
