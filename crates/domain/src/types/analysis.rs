//! Gap analysis output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::target::TargetKind;

/// Projection for a single current target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetGap {
    pub target_id: String,
    pub kind: TargetKind,
    pub target_value: f64,
    pub current_value: f64,
    /// `target - current`; negative when already ahead
    pub gap_amount: f64,
    pub achievement_rate: f64,
    pub days_left: i64,
    /// Pace needed per remaining day; never negative
    pub daily_required: f64,
}

/// Aggregate figures across every analyzed target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GapMetrics {
    pub total_targets: usize,
    pub average_achievement_rate: f64,
    /// Targets below 80% achievement
    pub targets_behind_schedule: usize,
}

/// Result of a gap analysis run for one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub analysis_id: String,
    pub owner_id: String,
    pub generated_on: NaiveDate,
    pub gaps: Vec<TargetGap>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: GapMetrics,
}

impl GapAnalysis {
    pub fn id_for(owner_id: &str, date: NaiveDate) -> String {
        format!("gap_analysis_{}_{}", owner_id, date.format("%Y%m%d"))
    }
}
