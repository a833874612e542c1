//! External system integration types
//!
//! CRM and accounting systems feed customers and sales facts into the core and
//! receive report activity and expense records back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::report::{DailyReport, SalesSummary, VisitSummary};
use super::sales::{Customer, SalesResult};
use crate::impl_domain_status_conversions;

/// Kind of external system a connector talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalSystemKind {
    Crm,
    Accounting,
}

impl_domain_status_conversions!(ExternalSystemKind {
    Crm => "crm",
    Accounting => "accounting",
});

/// How often a registered system is synced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl_domain_status_conversions!(SyncFrequency {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

/// Registration record for one external system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSystemConfig {
    pub config_id: String,
    pub system_name: String,
    pub kind: ExternalSystemKind,
    pub api_endpoint: String,
    #[serde(skip_serializing, default)]
    pub api_key: String,
    #[serde(default)]
    pub sync_frequency: SyncFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Records pulled from an external system in one sync pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncBatch {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub sales: Vec<SalesResult>,
}

/// Outcome of syncing one system
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    pub customers_synced: usize,
    pub sales_synced: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SyncOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, errors: vec![error.into()], ..Self::default() }
    }
}

/// Outcome of the last connection test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error,
    Unknown,
}

impl_domain_status_conversions!(ConnectionStatus {
    Connected => "connected",
    Disconnected => "disconnected",
    Error => "error",
    Unknown => "unknown",
});

/// Status row for one registered system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub config_id: String,
    pub system_name: String,
    pub kind: ExternalSystemKind,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    pub sync_frequency: SyncFrequency,
    pub connection_status: ConnectionStatus,
}

/// Report details forwarded with a CRM activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmActivityDetails {
    pub working_hours: f64,
    pub visits: Vec<VisitSummary>,
    pub sales_results: Vec<SalesSummary>,
    pub challenges: String,
    pub next_actions: String,
}

/// Daily report rendered as a CRM activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmActivity {
    pub activity_id: String,
    pub owner_id: String,
    pub date: NaiveDate,
    pub activity_type: String,
    pub summary: String,
    pub details: CrmActivityDetails,
}

impl From<&DailyReport> for CrmActivity {
    fn from(report: &DailyReport) -> Self {
        Self {
            activity_id: report.report_id.clone(),
            owner_id: report.owner_id.clone(),
            date: report.report_date,
            activity_type: "daily_report".to_string(),
            summary: format!(
                "Daily report: {} visits, {} sales",
                report.visits.len(),
                report.sales_results.len()
            ),
            details: CrmActivityDetails {
                working_hours: report.working_hours,
                visits: report.visits.clone(),
                sales_results: report.sales_results.clone(),
                challenges: report.challenges.clone(),
                next_actions: report.next_actions.clone(),
            },
        }
    }
}

/// Expense line pushed to accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub expense_id: String,
    pub owner_id: String,
    pub date: NaiveDate,
    pub category: String,
    pub amount: u64,
}

impl ExpenseRecord {
    /// Travel expense of a report as an accounting entry.
    pub fn travel_from(report: &DailyReport) -> Self {
        Self {
            expense_id: format!("exp_{}", report.report_id),
            owner_id: report.owner_id.clone(),
            date: report.report_date,
            category: "travel".to_string(),
            amount: report.travel_expense,
        }
    }
}

/// Record pushed from the core to an external system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum OutboundRecord {
    Activity(CrmActivity),
    Expense(ExpenseRecord),
}

impl OutboundRecord {
    /// System kind able to accept this record.
    pub fn destination(&self) -> ExternalSystemKind {
        match self {
            Self::Activity(_) => ExternalSystemKind::Crm,
            Self::Expense(_) => ExternalSystemKind::Accounting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crm_activity_summarizes_report() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 26).unwrap();
        let mut report = DailyReport::draft("u001", date);
        report.visits.push(VisitSummary {
            visit_id: "v1".into(),
            customer_id: "c001".into(),
            time: "10:00".into(),
            purpose: "proposal".into(),
            outcome: String::new(),
        });
        report.travel_expense = 1_200;

        let activity = CrmActivity::from(&report);
        assert_eq!(activity.activity_id, "rpt_u001_20240326");
        assert_eq!(activity.summary, "Daily report: 1 visits, 0 sales");

        let expense = ExpenseRecord::travel_from(&report);
        assert_eq!(expense.amount, 1_200);
        assert_eq!(OutboundRecord::Expense(expense).destination(), ExternalSystemKind::Accounting);
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = ExternalSystemConfig {
            config_id: "crm_001".into(),
            system_name: "SampleCRM".into(),
            kind: ExternalSystemKind::Crm,
            api_endpoint: "https://crm.example.com/v1".into(),
            api_key: "secret".into(),
            sync_frequency: SyncFrequency::Daily,
            last_sync: None,
            is_active: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
