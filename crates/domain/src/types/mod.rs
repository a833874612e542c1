//! Domain types and models

pub mod alert;
pub mod analysis;
pub mod integration;
pub mod report;
pub mod sales;
pub mod stats;
pub mod target;

pub use alert::{Alert, AlertCategory, AlertLevel};
pub use analysis::{GapAnalysis, GapMetrics, TargetGap};
pub use integration::{
    ConnectionStatus, CrmActivity, CrmActivityDetails, ExpenseRecord, ExternalSystemConfig,
    ExternalSystemKind, OutboundRecord, SyncBatch, SyncFrequency, SyncOutcome, SystemStatus,
};
pub use report::{ActivityEntry, DailyReport, ReportPatch, ReportStatus, SalesSummary, VisitSummary};
pub use sales::{Customer, SalesResult, SalesStatus, Visit};
pub use stats::{Dashboard, ReportStatistics, TargetSummary, TeamSummary};
pub use target::{AchievementBand, NewTarget, Target, TargetKind, TargetPatch};
