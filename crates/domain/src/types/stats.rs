//! Statistics and summary types
//!
//! This module centralizes the aggregate records returned to callers:
//! - Report statistics over a rolling window
//! - Per-owner target summaries
//! - Team-wide target summaries
//! - The per-owner dashboard snapshot

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::report::DailyReport;
use super::target::TargetKind;

/* -------------------------------------------------------------------------- */
/* Report Statistics */
/* -------------------------------------------------------------------------- */

/// Report counts and totals for one owner over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub owner_id: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,

    /// Reports created in the window
    pub total_reports: usize,

    /// Reports that reached `submitted` or `approved`
    pub submitted_reports: usize,

    pub approved_reports: usize,

    /// Visit lines across all reports
    pub total_visits: usize,

    /// Sales lines across all reports
    pub total_sales: usize,

    pub total_working_hours: f64,
    pub total_travel_expense: u64,

    /// `submitted / total * 100`, 0 when there are no reports
    pub submission_rate: f64,
}

/* -------------------------------------------------------------------------- */
/* Target Summaries */
/* -------------------------------------------------------------------------- */

/// Achievement buckets for an owner's current targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TargetSummary {
    pub total_targets: usize,
    pub achieved_targets: usize,
    pub on_track_targets: usize,
    pub behind_targets: usize,
    pub critical_targets: usize,
    pub targets_by_kind: BTreeMap<TargetKind, usize>,
    /// Mean achievement rate, 0 when there are no current targets
    pub average_achievement_rate: f64,
}

/// Team roll-up of member target summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: String,
    pub total_members: usize,
    pub members_summary: BTreeMap<String, TargetSummary>,
    /// Sum of current values per kind
    pub team_totals: BTreeMap<TargetKind, f64>,
    /// Sum of target values per kind
    pub team_targets: BTreeMap<TargetKind, f64>,
    pub team_achievement_rates: BTreeMap<TargetKind, f64>,
}

/* -------------------------------------------------------------------------- */
/* Dashboard */
/* -------------------------------------------------------------------------- */

/// Everything the landing screen shows for one owner, as of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub owner_id: String,
    pub generated_on: NaiveDate,
    /// Report statistics over the default window
    pub statistics: ReportStatistics,
    pub target_summary: TargetSummary,
    /// Leading alerts only, missing-report alerts first
    pub alerts: Vec<Alert>,
    /// Reports from the last week, newest first
    pub recent_reports: Vec<DailyReport>,
}
