//! # FieldPulse Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Report lifecycle and target progress services
//! - Alert and gap analysis engines
//! - Dashboard composition
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `fieldpulse-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod alerts;
pub mod analysis;
pub mod clock;
pub mod dashboard;
pub mod integration;
pub mod report;
pub mod target;

// Re-export specific items to avoid ambiguity
pub use alerts::AlertEngine;
pub use analysis::GapAnalyzer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::DashboardService;
pub use integration::ports::{ConnectorFactory, ExternalSystemConnector};
pub use integration::IntegrationService;
pub use report::ports::{ReportRepository, SalesResultRepository, VisitRepository};
pub use report::ReportService;
pub use target::ports::TargetRepository;
pub use target::TargetService;
