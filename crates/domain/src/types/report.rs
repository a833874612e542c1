//! Daily report types
//!
//! A report is keyed by owner and calendar date. Its lifecycle only moves
//! forward: `draft → submitted → approved`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WORKING_HOURS;
use crate::impl_domain_status_conversions;

/// Lifecycle state of a daily report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
}

impl_domain_status_conversions!(ReportStatus {
    Draft => "draft",
    Submitted => "submitted",
    Approved => "approved",
});

impl ReportStatus {
    /// True once the report has left the draft state.
    pub fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted | Self::Approved)
    }
}

/// Free-form entry in the activity log of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub activity: String,
    #[serde(default)]
    pub detail: String,
}

impl ActivityEntry {
    pub fn new(activity: impl Into<String>) -> Self {
        Self { time: None, activity: activity.into(), detail: String::new() }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// Denormalized visit line embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSummary {
    pub visit_id: String,
    pub customer_id: String,
    /// `HH:MM` of the visit
    pub time: String,
    pub purpose: String,
    #[serde(default)]
    pub outcome: String,
}

/// Denormalized sales line embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub result_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u64,
    pub amount: u64,
}

/// Daily activity report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub report_id: String,
    pub owner_id: String,
    pub report_date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    #[serde(default)]
    pub visits: Vec<VisitSummary>,
    #[serde(default)]
    pub sales_results: Vec<SalesSummary>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub next_actions: String,
    pub working_hours: f64,
    #[serde(default)]
    pub travel_expense: u64,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
}

impl DailyReport {
    /// Deterministic id for an owner's report on a given day.
    pub fn id_for(owner_id: &str, date: NaiveDate) -> String {
        format!("rpt_{}_{}", owner_id, date.format("%Y%m%d"))
    }

    /// Fresh draft report with default working hours.
    pub fn draft(owner_id: impl Into<String>, report_date: NaiveDate) -> Self {
        let owner_id = owner_id.into();
        Self {
            report_id: Self::id_for(&owner_id, report_date),
            owner_id,
            report_date,
            activities: Vec::new(),
            visits: Vec::new(),
            sales_results: Vec::new(),
            challenges: String::new(),
            next_actions: String::new(),
            working_hours: DEFAULT_WORKING_HOURS,
            travel_expense: 0,
            status: ReportStatus::Draft,
            submitted_at: None,
            approved_at: None,
            approved_by: None,
        }
    }
}

/// Partial update for a report.
///
/// Only the fields listed here can be edited; `None` leaves the current value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivityEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits: Option<Vec<VisitSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_results: Option<Vec<SalesSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_actions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_expense: Option<u64>,
}

impl ReportPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activities(mut self, activities: Vec<ActivityEntry>) -> Self {
        self.activities = Some(activities);
        self
    }

    pub fn visits(mut self, visits: Vec<VisitSummary>) -> Self {
        self.visits = Some(visits);
        self
    }

    pub fn sales_results(mut self, sales_results: Vec<SalesSummary>) -> Self {
        self.sales_results = Some(sales_results);
        self
    }

    pub fn challenges(mut self, challenges: impl Into<String>) -> Self {
        self.challenges = Some(challenges.into());
        self
    }

    pub fn next_actions(mut self, next_actions: impl Into<String>) -> Self {
        self.next_actions = Some(next_actions.into());
        self
    }

    pub fn working_hours(mut self, hours: f64) -> Self {
        self.working_hours = Some(hours);
        self
    }

    pub fn travel_expense(mut self, expense: u64) -> Self {
        self.travel_expense = Some(expense);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
