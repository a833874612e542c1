//! Dashboard service
//!
//! Read-only composition over the report, target and alert services. It owns
//! no state and writes nothing.

use std::sync::Arc;

use chrono::Duration;
use fieldpulse_domain::constants::{DASHBOARD_ALERT_LIMIT, DASHBOARD_RECENT_DAYS};
use fieldpulse_domain::{Dashboard, Result};
use tracing::debug;

use crate::alerts::AlertEngine;
use crate::clock::Clock;
use crate::report::ReportService;
use crate::target::TargetService;

/// Builds the landing snapshot for one owner
pub struct DashboardService {
    reports: Arc<ReportService>,
    targets: Arc<TargetService>,
    alerts: Arc<AlertEngine>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Create a dashboard service over the existing services
    pub fn new(
        reports: Arc<ReportService>,
        targets: Arc<TargetService>,
        alerts: Arc<AlertEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { reports, targets, alerts, clock }
    }

    /// Statistics, target summary, the leading alerts and last week's reports.
    ///
    /// # Errors
    /// Propagates the first repository failure from any underlying service.
    pub fn dashboard(&self, owner_id: &str) -> Result<Dashboard> {
        let today = self.clock.today();

        let statistics = self.reports.default_report_statistics(owner_id)?;
        let target_summary = self.targets.target_summary(owner_id)?;

        let mut alerts = self.alerts.alerts_for(owner_id)?;
        alerts.truncate(DASHBOARD_ALERT_LIMIT);

        let recent_reports = self.reports.list_reports(
            owner_id,
            today - Duration::days(DASHBOARD_RECENT_DAYS),
            today,
        )?;

        debug!(
            owner_id,
            alerts = alerts.len(),
            recent_reports = recent_reports.len(),
            "Built dashboard"
        );

        Ok(Dashboard {
            owner_id: owner_id.to_string(),
            generated_on: today,
            statistics,
            target_summary,
            alerts,
            recent_reports,
        })
    }
}
