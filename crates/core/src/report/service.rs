//! Report lifecycle service - core business logic

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use fieldpulse_domain::{
    DailyReport, FieldPulseError, ReportPatch, ReportSettings, ReportStatistics, ReportStatus,
    Result, SalesResult, SalesSummary, Visit, VisitSummary,
};
use tracing::{debug, info, warn};

use super::ports::{ReportRepository, SalesResultRepository, VisitRepository};
use crate::clock::Clock;

/// Header row of the report CSV export
pub const REPORT_CSV_HEADER: &str = "date,working_hours,visits,sales,travel_expense,status";

/// Creates, edits, submits and approves daily reports
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    sales: Arc<dyn SalesResultRepository>,
    visits: Arc<dyn VisitRepository>,
    clock: Arc<dyn Clock>,
    settings: ReportSettings,
}

impl ReportService {
    /// Create a new report service with default settings
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        sales: Arc<dyn SalesResultRepository>,
        visits: Arc<dyn VisitRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { reports, sales, visits, clock, settings: ReportSettings::default() }
    }

    /// Override the submission and statistics settings
    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Create the owner's report for `date`, or return the existing one
    /// untouched.
    pub fn create_report(&self, owner_id: &str, date: NaiveDate) -> Result<DailyReport> {
        let mut draft = DailyReport::draft(owner_id, date);
        draft.working_hours = self.settings.default_working_hours;
        let draft_id = draft.report_id.clone();

        let stored = self.reports.insert_report_if_absent(draft)?;
        info!(report_id = %draft_id, status = %stored.status, "Daily report ready");
        Ok(stored)
    }

    /// Apply the fields present in `patch`.
    ///
    /// Working hours that are negative or not finite are dropped with a
    /// warning; the rest of the patch still applies.
    pub fn update_report(&self, report_id: &str, patch: ReportPatch) -> Result<DailyReport> {
        let mut report = self.require(report_id)?;
        if report.status == ReportStatus::Approved {
            warn!(report_id, "Rejected edit of approved report");
            return Err(FieldPulseError::InvalidState(format!(
                "report {report_id} is approved and can no longer be edited"
            )));
        }

        let ReportPatch {
            activities,
            visits,
            sales_results,
            challenges,
            next_actions,
            working_hours,
            travel_expense,
        } = patch;

        if let Some(activities) = activities {
            report.activities = activities;
        }
        if let Some(visits) = visits {
            report.visits = visits;
        }
        if let Some(sales_results) = sales_results {
            report.sales_results = sales_results;
        }
        if let Some(challenges) = challenges {
            report.challenges = challenges;
        }
        if let Some(next_actions) = next_actions {
            report.next_actions = next_actions;
        }
        match working_hours {
            Some(hours) if hours.is_finite() && hours >= 0.0 => report.working_hours = hours,
            Some(hours) => warn!(report_id, hours, "Ignored malformed working hours"),
            None => {}
        }
        if let Some(expense) = travel_expense {
            report.travel_expense = expense;
        }

        self.reports.save_report(&report)?;
        info!(report_id, "Daily report updated");
        Ok(report)
    }

    /// Move a draft to submitted after checking every submission rule.
    pub fn submit_report(&self, report_id: &str) -> Result<DailyReport> {
        let mut report = self.require(report_id)?;
        if report.status != ReportStatus::Draft {
            warn!(report_id, status = %report.status, "Rejected submit of non-draft report");
            return Err(FieldPulseError::InvalidState(format!(
                "report {report_id} is {} and cannot be submitted",
                report.status
            )));
        }

        let violations = self.submission_violations(&report);
        if !violations.is_empty() {
            warn!(report_id, violations = ?violations, "Report failed submission checks");
            return Err(FieldPulseError::ValidationFailed(violations));
        }

        report.status = ReportStatus::Submitted;
        report.submitted_at = Some(self.clock.now());
        self.reports.save_report(&report)?;

        info!(report_id, "Daily report submitted");
        Ok(report)
    }

    /// Approve a submitted report.
    pub fn approve_report(&self, report_id: &str, approver_id: &str) -> Result<DailyReport> {
        let mut report = self.require(report_id)?;
        if report.status != ReportStatus::Submitted {
            warn!(report_id, status = %report.status, "Rejected approval of non-submitted report");
            return Err(FieldPulseError::InvalidState(format!(
                "report {report_id} is {} and cannot be approved",
                report.status
            )));
        }

        report.status = ReportStatus::Approved;
        report.approved_at = Some(self.clock.now());
        report.approved_by = Some(approver_id.to_string());
        self.reports.save_report(&report)?;

        info!(report_id, approver_id, "Daily report approved");
        Ok(report)
    }

    /// Owner's reports within `[start, end]`, newest first.
    pub fn list_reports(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyReport>> {
        let mut reports = self.reports.reports_for_owner(owner_id, start, end)?;
        reports.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        debug!(owner_id, %start, %end, count = reports.len(), "Listed reports");
        Ok(reports)
    }

    /// Submitted reports waiting for approval, oldest submission first.
    pub fn pending_approvals(&self) -> Result<Vec<DailyReport>> {
        let mut reports = self.reports.reports_with_status(ReportStatus::Submitted)?;
        reports.sort_by(|a, b| {
            a.submitted_at.cmp(&b.submitted_at).then_with(|| a.report_id.cmp(&b.report_id))
        });
        Ok(reports)
    }

    /// Store a visit and add a summary line to that day's report if one
    /// exists.
    pub fn record_visit(&self, visit: Visit) -> Result<()> {
        self.visits.save_visit(&visit)?;

        let summary = VisitSummary {
            visit_id: visit.visit_id.clone(),
            customer_id: visit.customer_id.clone(),
            time: visit.visited_at.format("%H:%M").to_string(),
            purpose: visit.purpose.clone(),
            outcome: visit.outcome.clone(),
        };
        self.attach(&visit.owner_id, visit.visit_date(), |report| {
            if report.visits.iter().any(|v| v.visit_id == summary.visit_id) {
                return false;
            }
            report.visits.push(summary);
            true
        })?;

        info!(visit_id = %visit.visit_id, owner_id = %visit.owner_id, "Visit recorded");
        Ok(())
    }

    /// Owner's visits on dates within `[start, end]`, in visit order.
    pub fn list_visits(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Visit>> {
        let mut visits = self.visits.visits_between(owner_id, start, end)?;
        visits.sort_by(|a, b| a.visited_at.cmp(&b.visited_at));
        Ok(visits)
    }

    /// Store a sales fact and add a summary line to that day's report if one
    /// exists.
    pub fn record_sales_result(&self, result: SalesResult) -> Result<()> {
        self.sales.save_sales_result(&result)?;

        let summary = SalesSummary {
            result_id: result.result_id.clone(),
            customer_id: result.customer_id.clone(),
            product_id: result.product_id.clone(),
            quantity: result.quantity,
            amount: result.total_amount,
        };
        self.attach(&result.owner_id, result.sale_date, |report| {
            if report.sales_results.iter().any(|s| s.result_id == summary.result_id) {
                return false;
            }
            report.sales_results.push(summary);
            true
        })?;

        info!(result_id = %result.result_id, owner_id = %result.owner_id, "Sales result recorded");
        Ok(())
    }

    /// Aggregate the owner's reports over `[today - period_days, today]`.
    pub fn report_statistics(&self, owner_id: &str, period_days: u32) -> Result<ReportStatistics> {
        let window_end = self.clock.today();
        let window_start = window_end - Duration::days(i64::from(period_days));
        let reports = self.reports.reports_for_owner(owner_id, window_start, window_end)?;

        let total_reports = reports.len();
        let submitted_reports = reports.iter().filter(|r| r.status.is_submitted()).count();
        let approved_reports =
            reports.iter().filter(|r| r.status == ReportStatus::Approved).count();
        let submission_rate = if total_reports == 0 {
            0.0
        } else {
            submitted_reports as f64 / total_reports as f64 * 100.0
        };

        Ok(ReportStatistics {
            owner_id: owner_id.to_string(),
            window_start,
            window_end,
            total_reports,
            submitted_reports,
            approved_reports,
            total_visits: reports.iter().map(|r| r.visits.len()).sum(),
            total_sales: reports.iter().map(|r| r.sales_results.len()).sum(),
            total_working_hours: reports.iter().map(|r| r.working_hours).sum(),
            total_travel_expense: reports
                .iter()
                .fold(0_u64, |acc, r| acc.saturating_add(r.travel_expense)),
            submission_rate,
        })
    }

    /// Statistics over the configured default window.
    pub fn default_report_statistics(&self, owner_id: &str) -> Result<ReportStatistics> {
        self.report_statistics(owner_id, self.settings.statistics_window_days)
    }

    /// Render the owner's reports in `[start, end]` as CSV, newest first.
    pub fn export_reports_csv(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String> {
        let reports = self.list_reports(owner_id, start, end)?;

        let lines = reports.iter().map(|report| {
            format!(
                "{},{},{},{},{},{}",
                report.report_date,
                report.working_hours,
                report.visits.len(),
                report.sales_results.len(),
                report.travel_expense,
                report.status
            )
        });
        let rows: Vec<String> =
            std::iter::once(REPORT_CSV_HEADER.to_string()).chain(lines).collect();
        Ok(rows.join("\n"))
    }

    fn require(&self, report_id: &str) -> Result<DailyReport> {
        self.reports
            .get_report(report_id)?
            .ok_or_else(|| FieldPulseError::NotFound(format!("report {report_id}")))
    }

    fn submission_violations(&self, report: &DailyReport) -> Vec<String> {
        let mut violations = Vec::new();
        if report.activities.is_empty() {
            violations.push("no activities recorded".to_string());
        }
        if report.working_hours <= 0.0 {
            violations.push("working hours must be greater than 0".to_string());
        }
        if report.working_hours > self.settings.max_working_hours {
            violations.push(format!(
                "working hours must not exceed {}",
                self.settings.max_working_hours
            ));
        }
        violations
    }

    /// Add a summary line to the fact's report. `append` returns false when
    /// the report already carries a line for the fact.
    fn attach(
        &self,
        owner_id: &str,
        date: NaiveDate,
        append: impl FnOnce(&mut DailyReport) -> bool,
    ) -> Result<()> {
        let report_id = DailyReport::id_for(owner_id, date);
        let Some(mut report) = self.reports.get_report(&report_id)? else {
            debug!(report_id = %report_id, "No report for fact date; stored without summary");
            return Ok(());
        };
        if report.status == ReportStatus::Approved {
            warn!(report_id = %report_id, "Report approved; fact stored without summary");
            return Ok(());
        }

        if !append(&mut report) {
            debug!(report_id = %report_id, "Fact already summarized on report");
            return Ok(());
        }
        self.reports.save_report(&report)
    }
}
