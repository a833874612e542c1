//! Shared test helpers for `fieldpulse-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod connectors;
pub mod repositories;

use std::sync::Arc;

use chrono::NaiveDate;
use fieldpulse_core::{FixedClock, ReportService, TargetService};

pub use repositories::MockStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Store, clock and both services wired together.
pub struct Harness {
    pub store: Arc<MockStore>,
    pub clock: Arc<FixedClock>,
    pub reports: Arc<ReportService>,
    pub targets: Arc<TargetService>,
}

impl Harness {
    pub fn on(today: NaiveDate) -> Self {
        let store = Arc::new(MockStore::default());
        let clock = Arc::new(FixedClock::on(today));
        let reports = Arc::new(ReportService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        let targets = Arc::new(TargetService::new(store.clone(), store.clone(), clock.clone()));
        Self { store, clock, reports, targets }
    }
}
