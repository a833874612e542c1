//! Alert engine
//!
//! Alerts are derived on every call from report and target state. Nothing is
//! stored here; the same inputs on the same day yield the same alert ids.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use fieldpulse_domain::{
    Alert, AlertCategory, AlertSettings, DailyReport, ReportStatus, Result, Target,
};
use tracing::debug;

use crate::clock::Clock;
use crate::report::ports::ReportRepository;
use crate::target::ports::TargetRepository;

/// Derives warnings from report and target state
pub struct AlertEngine {
    reports: Arc<dyn ReportRepository>,
    targets: Arc<dyn TargetRepository>,
    clock: Arc<dyn Clock>,
    settings: AlertSettings,
}

impl AlertEngine {
    /// Create an alert engine with default thresholds
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        targets: Arc<dyn TargetRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { reports, targets, clock, settings: AlertSettings::default() }
    }

    /// Override the alert thresholds
    pub fn with_settings(mut self, settings: AlertSettings) -> Self {
        self.settings = settings;
        self
    }

    /// One warning per owner whose report for yesterday is absent or still a
    /// draft.
    pub fn missing_report_alerts(&self, owner_ids: &[String]) -> Result<Vec<Alert>> {
        if !self.settings.missing_report_enabled {
            return Ok(Vec::new());
        }

        let today = self.clock.today();
        let yesterday = today - Duration::days(1);
        let mut alerts = Vec::new();

        for owner_id in owner_ids {
            let report_id = DailyReport::id_for(owner_id, yesterday);
            let missing = match self.reports.get_report(&report_id)? {
                None => true,
                Some(report) => report.status == ReportStatus::Draft,
            };
            if missing {
                alerts.push(self.missing_report_alert(owner_id, &report_id, yesterday, today));
            }
        }

        debug!(owners = owner_ids.len(), alerts = alerts.len(), "Evaluated missing reports");
        Ok(alerts)
    }

    /// At most one alert per active, started target of the owner.
    ///
    /// Targets whose period already ended are included so expiry can be
    /// reported.
    pub fn target_alerts(&self, owner_id: &str) -> Result<Vec<Alert>> {
        let today = self.clock.today();
        let mut targets = self.targets.targets_for_owner(owner_id)?;
        targets.retain(|t| t.is_active && t.period_start <= today);
        targets.sort_by(|a, b| a.target_id.cmp(&b.target_id));

        let alerts: Vec<Alert> =
            targets.iter().filter_map(|t| evaluate_target(t, today, &self.settings)).collect();

        debug!(owner_id, targets = targets.len(), alerts = alerts.len(), "Evaluated targets");
        Ok(alerts)
    }

    /// Missing-report and target alerts for one owner.
    pub fn alerts_for(&self, owner_id: &str) -> Result<Vec<Alert>> {
        let mut alerts = self.missing_report_alerts(&[owner_id.to_string()])?;
        alerts.extend(self.target_alerts(owner_id)?);
        Ok(alerts)
    }

    fn missing_report_alert(
        &self,
        owner_id: &str,
        report_id: &str,
        report_date: NaiveDate,
        today: NaiveDate,
    ) -> Alert {
        let category = AlertCategory::MissingReport;
        Alert {
            alert_id: Alert::id_for(category, owner_id, today),
            owner_id: owner_id.to_string(),
            category,
            level: category.level(),
            title: "Daily report not submitted".to_string(),
            message: format!("The daily report for {report_date} has not been submitted."),
            target_id: None,
            report_id: Some(report_id.to_string()),
            generated_on: today,
            expires_on: Some(today + Duration::days(self.settings.missing_report_ttl_days)),
        }
    }
}

/// First matching rule for a target: expired, then low achievement, then
/// deadline.
pub fn evaluate_target(
    target: &Target,
    today: NaiveDate,
    settings: &AlertSettings,
) -> Option<Alert> {
    let days_left = target.days_left(today);
    let rate = target.achievement_rate();

    let (category, title, message) = if days_left < 0 {
        (
            AlertCategory::TargetExpired,
            "Target period ended",
            format!("{} target ended {} day(s) ago.", target.kind, -days_left),
        )
    } else if rate < settings.low_achievement_rate
        && days_left <= settings.low_achievement_window_days
    {
        (
            AlertCategory::LowAchievement,
            "Target achievement low",
            format!("{} target is at {rate:.1}% with {days_left} day(s) left.", target.kind),
        )
    } else if days_left <= settings.deadline_window_days {
        (
            AlertCategory::TargetDeadline,
            "Target deadline approaching",
            format!("{} target ends in {days_left} day(s).", target.kind),
        )
    } else {
        return None;
    };

    Some(Alert {
        alert_id: Alert::id_for(category, &target.target_id, today),
        owner_id: target.owner_id.clone(),
        category,
        level: category.level(),
        title: title.to_string(),
        message,
        target_id: Some(target.target_id.clone()),
        report_id: None,
        generated_on: today,
        expires_on: None,
    })
}
