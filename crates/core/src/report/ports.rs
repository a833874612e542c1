//! Port interfaces for report storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. They are synchronous: the store is
//! expected to be in-process and non-blocking.

use chrono::NaiveDate;
use fieldpulse_domain::{DailyReport, ReportStatus, Result, SalesResult, Visit};

/// Trait for persisting daily reports
pub trait ReportRepository: Send + Sync {
    /// Fetch a report by id
    fn get_report(&self, report_id: &str) -> Result<Option<DailyReport>>;

    /// Store `report` unless its id is taken; returns the stored report either
    /// way. Must be atomic with respect to concurrent callers.
    fn insert_report_if_absent(&self, report: DailyReport) -> Result<DailyReport>;

    /// Overwrite an existing report
    fn save_report(&self, report: &DailyReport) -> Result<()>;

    /// Reports of `owner_id` dated within `[start, end]`, in any order
    fn reports_for_owner(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyReport>>;

    /// Reports of every owner in the given status
    fn reports_with_status(&self, status: ReportStatus) -> Result<Vec<DailyReport>>;
}

/// Trait for persisting sales facts
pub trait SalesResultRepository: Send + Sync {
    /// Store a sales fact, replacing one with the same id
    fn save_sales_result(&self, result: &SalesResult) -> Result<()>;

    /// Sales of `owner_id` dated within `[start, end]`
    fn sales_between(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SalesResult>>;

    /// Sales of `owner_id` dated strictly before `date`
    fn sales_before(&self, owner_id: &str, date: NaiveDate) -> Result<Vec<SalesResult>>;
}

/// Trait for persisting visit facts
pub trait VisitRepository: Send + Sync {
    fn save_visit(&self, visit: &Visit) -> Result<()>;

    /// Visits of `owner_id` on dates within `[start, end]`
    fn visits_between(&self, owner_id: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Visit>>;
}
