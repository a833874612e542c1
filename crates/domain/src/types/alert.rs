//! Derived alert types
//!
//! Alerts are recomputed on every query and carry deterministic ids, so the
//! same store state evaluated on the same day yields the same alert set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl_domain_status_conversions!(AlertLevel {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

/// Rule that produced an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    MissingReport,
    TargetExpired,
    LowAchievement,
    TargetDeadline,
}

impl_domain_status_conversions!(AlertCategory {
    MissingReport => "missing_report",
    TargetExpired => "target_expired",
    LowAchievement => "low_achievement",
    TargetDeadline => "target_deadline",
});

impl AlertCategory {
    /// Severity attached to every alert of this category.
    pub fn level(self) -> AlertLevel {
        match self {
            Self::MissingReport | Self::LowAchievement => AlertLevel::Warning,
            Self::TargetExpired => AlertLevel::Critical,
            Self::TargetDeadline => AlertLevel::Info,
        }
    }
}

/// A derived alert addressed to one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub owner_id: String,
    pub category: AlertCategory,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Evaluation date the alert was derived for
    pub generated_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

impl Alert {
    /// Deterministic id from category, subject (owner or target) and date.
    pub fn id_for(category: AlertCategory, subject: &str, date: NaiveDate) -> String {
        format!("alert_{}_{}_{}", category, subject, date.format("%Y%m%d"))
    }
}
