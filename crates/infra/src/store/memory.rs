//! In-memory implementation of every core repository port.
//!
//! Each entity map sits behind its own `parking_lot::RwLock`, so readers of
//! reports never contend with writers of sales facts. Insert-if-absent holds
//! the write guard across the lookup and the insert, which makes idempotent
//! creation race-free.

use std::collections::HashMap;

use chrono::NaiveDate;
use fieldpulse_core::{ReportRepository, SalesResultRepository, TargetRepository, VisitRepository};
use fieldpulse_domain::{
    DailyReport, ReportStatus, Result as DomainResult, SalesResult, Target, Visit,
};
use parking_lot::RwLock;
use tracing::debug;

// Type aliases for the keyed maps
type ReportMap = RwLock<HashMap<String, DailyReport>>;
type TargetMap = RwLock<HashMap<String, Target>>;
type SalesMap = RwLock<HashMap<String, SalesResult>>;
type VisitMap = RwLock<HashMap<String, Visit>>;

/// Process-local entity store.
///
/// Share it behind an `Arc` and hand the same instance to every service that
/// needs one of the ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    reports: ReportMap,
    targets: TargetMap,
    sales: SalesMap,
    visits: VisitMap,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub fn report_count(&self) -> usize {
        self.reports.read().len()
    }

    /// Number of stored targets.
    pub fn target_count(&self) -> usize {
        self.targets.read().len()
    }

    /// Number of stored sales facts.
    pub fn sales_count(&self) -> usize {
        self.sales.read().len()
    }

    /// Number of stored visit facts.
    pub fn visit_count(&self) -> usize {
        self.visits.read().len()
    }
}

fn within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

impl ReportRepository for InMemoryStore {
    fn get_report(&self, report_id: &str) -> DomainResult<Option<DailyReport>> {
        Ok(self.reports.read().get(report_id).cloned())
    }

    fn insert_report_if_absent(&self, report: DailyReport) -> DomainResult<DailyReport> {
        let mut reports = self.reports.write();
        let stored = reports.entry(report.report_id.clone()).or_insert(report);
        Ok(stored.clone())
    }

    fn save_report(&self, report: &DailyReport) -> DomainResult<()> {
        self.reports.write().insert(report.report_id.clone(), report.clone());
        Ok(())
    }

    fn reports_for_owner(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<DailyReport>> {
        let matched: Vec<DailyReport> = self
            .reports
            .read()
            .values()
            .filter(|r| r.owner_id == owner_id && within(r.report_date, start, end))
            .cloned()
            .collect();

        debug!(owner_id, %start, %end, count = matched.len(), "Scanned reports");
        Ok(matched)
    }

    fn reports_with_status(&self, status: ReportStatus) -> DomainResult<Vec<DailyReport>> {
        Ok(self.reports.read().values().filter(|r| r.status == status).cloned().collect())
    }
}

impl TargetRepository for InMemoryStore {
    fn get_target(&self, target_id: &str) -> DomainResult<Option<Target>> {
        Ok(self.targets.read().get(target_id).cloned())
    }

    fn insert_target_if_absent(&self, target: Target) -> DomainResult<Target> {
        let mut targets = self.targets.write();
        let stored = targets.entry(target.target_id.clone()).or_insert(target);
        Ok(stored.clone())
    }

    fn save_target(&self, target: &Target) -> DomainResult<()> {
        self.targets.write().insert(target.target_id.clone(), target.clone());
        Ok(())
    }

    fn targets_for_owner(&self, owner_id: &str) -> DomainResult<Vec<Target>> {
        Ok(self.targets.read().values().filter(|t| t.owner_id == owner_id).cloned().collect())
    }
}

impl SalesResultRepository for InMemoryStore {
    fn save_sales_result(&self, result: &SalesResult) -> DomainResult<()> {
        self.sales.write().insert(result.result_id.clone(), result.clone());
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
            .read()
            .values()
            .filter(|s| s.owner_id == owner_id && within(s.sale_date, start, end))
            .cloned()
            .collect())
    }

    fn sales_before(&self, owner_id: &str, date: NaiveDate) -> DomainResult<Vec<SalesResult>> {
        Ok(self
            .sales
            .read()
            .values()
            .filter(|s| s.owner_id == owner_id && s.sale_date < date)
            .cloned()
            .collect())
    }
}

impl VisitRepository for InMemoryStore {
    fn save_visit(&self, visit: &Visit) -> DomainResult<()> {
        self.visits.write().insert(visit.visit_id.clone(), visit.clone());
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
            .read()
            .values()
            .filter(|v| v.owner_id == owner_id && within(v.visit_date(), start, end))
            .cloned()
            .collect())
    }
}
