//! Mock repository implementations for testing
//!
//! Provides an in-memory mock for all core repository ports, enabling
//! deterministic service tests without a real store.

use std::collections::HashMap;

use chrono::NaiveDate;
use fieldpulse_core::{ReportRepository, SalesResultRepository, TargetRepository, VisitRepository};
use fieldpulse_domain::{
    DailyReport, ReportStatus, Result as DomainResult, SalesResult, Target, Visit,
};
use parking_lot::Mutex;

/// In-memory mock for every repository port.
///
/// Counts writes so tests can assert that rejected operations left the store
/// untouched.
#[derive(Default)]
pub struct MockStore {
    reports: Mutex<HashMap<String, DailyReport>>,
    targets: Mutex<HashMap<String, Target>>,
    sales: Mutex<Vec<SalesResult>>,
    visits: Mutex<Vec<Visit>>,
    writes: Mutex<usize>,
}

impl MockStore {
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    pub fn report(&self, report_id: &str) -> Option<DailyReport> {
        self.reports.lock().get(report_id).cloned()
    }

    pub fn target(&self, target_id: &str) -> Option<Target> {
        self.targets.lock().get(target_id).cloned()
    }

    pub fn sales_count(&self) -> usize {
        self.sales.lock().len()
    }

    pub fn visit_count(&self) -> usize {
        self.visits.lock().len()
    }

    fn bump(&self) {
        *self.writes.lock() += 1;
    }
}

impl ReportRepository for MockStore {
    fn get_report(&self, report_id: &str) -> DomainResult<Option<DailyReport>> {
        Ok(self.reports.lock().get(report_id).cloned())
    }

    fn insert_report_if_absent(&self, report: DailyReport) -> DomainResult<DailyReport> {
        let mut reports = self.reports.lock();
        if let Some(existing) = reports.get(&report.report_id) {
            return Ok(existing.clone());
        }
        self.bump();
        reports.insert(report.report_id.clone(), report.clone());
        Ok(report)
    }

    fn save_report(&self, report: &DailyReport) -> DomainResult<()> {
        self.bump();
        self.reports.lock().insert(report.report_id.clone(), report.clone());
        Ok(())
    }

    fn reports_for_owner(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<DailyReport>> {
        Ok(self
            .reports
            .lock()
            .values()
            .filter(|r| r.owner_id == owner_id && start <= r.report_date && r.report_date <= end)
            .cloned()
            .collect())
    }

    fn reports_with_status(&self, status: ReportStatus) -> DomainResult<Vec<DailyReport>> {
        Ok(self.reports.lock().values().filter(|r| r.status == status).cloned().collect())
    }
}

impl TargetRepository for MockStore {
    fn get_target(&self, target_id: &str) -> DomainResult<Option<Target>> {
        Ok(self.targets.lock().get(target_id).cloned())
    }

    fn insert_target_if_absent(&self, target: Target) -> DomainResult<Target> {
        let mut targets = self.targets.lock();
        if let Some(existing) = targets.get(&target.target_id) {
            return Ok(existing.clone());
        }
        self.bump();
        targets.insert(target.target_id.clone(), target.clone());
        Ok(target)
    }

    fn save_target(&self, target: &Target) -> DomainResult<()> {
        self.bump();
        self.targets.lock().insert(target.target_id.clone(), target.clone());
        Ok(())
    }

    fn targets_for_owner(&self, owner_id: &str) -> DomainResult<Vec<Target>> {
        Ok(self.targets.lock().values().filter(|t| t.owner_id == owner_id).cloned().collect())
    }
}

impl SalesResultRepository for MockStore {
    fn save_sales_result(&self, result: &SalesResult) -> DomainResult<()> {
        self.bump();
        let mut sales = self.sales.lock();
        sales.retain(|s| s.result_id != result.result_id);
        sales.push(result.clone());
        Ok(())
    }

    fn sales_between(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<SalesResult>> {
        Ok(self
            .sales
            .lock()
            .iter()
            .filter(|s| s.owner_id == owner_id && start <= s.sale_date && s.sale_date <= end)
            .cloned()
            .collect())
    }

    fn sales_before(&self, owner_id: &str, date: NaiveDate) -> DomainResult<Vec<SalesResult>> {
        Ok(self
            .sales
            .lock()
            .iter()
            .filter(|s| s.owner_id == owner_id && s.sale_date < date)
            .cloned()
            .collect())
    }
}

impl VisitRepository for MockStore {
    fn save_visit(&self, visit: &Visit) -> DomainResult<()> {
        self.bump();
        let mut visits = self.visits.lock();
        visits.retain(|v| v.visit_id != visit.visit_id);
        visits.push(visit.clone());
        Ok(())
    }

    fn visits_between(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Visit>> {
        Ok(self
            .visits
            .lock()
            .iter()
            .filter(|v| {
                let day = v.visit_date();
                v.owner_id == owner_id && start <= day && day <= end
            })
            .cloned()
            .collect())
    }
}
