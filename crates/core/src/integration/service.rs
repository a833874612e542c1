//! Integration service - registry of external systems
//!
//! Connector failures never escape as errors from bulk operations; they are
//! logged and reported in the per-system outcome instead.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use fieldpulse_domain::{
    ConnectionStatus, CrmActivity, DailyReport, ExpenseRecord, ExternalSystemConfig,
    FieldPulseError, OutboundRecord, Result, SyncOutcome, SystemStatus,
};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use super::ports::{ConnectorFactory, ExternalSystemConnector};
use crate::clock::Clock;
use crate::report::ReportService;

/// Look-back used on the first sync of a system
const INITIAL_SYNC_WINDOW_DAYS: i64 = 30;

struct RegisteredSystem {
    config: ExternalSystemConfig,
    connector: Arc<dyn ExternalSystemConnector>,
}

/// Registers external systems, syncs from them and pushes to them
pub struct IntegrationService {
    factory: Arc<dyn ConnectorFactory>,
    reports: Arc<ReportService>,
    clock: Arc<dyn Clock>,
    systems: RwLock<BTreeMap<String, RegisteredSystem>>,
}

impl IntegrationService {
    /// Create an integration service
    pub fn new(
        factory: Arc<dyn ConnectorFactory>,
        reports: Arc<ReportService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { factory, reports, clock, systems: RwLock::new(BTreeMap::new()) }
    }

    /// Register (or replace) an external system and build its connector.
    pub fn register_system(&self, config: ExternalSystemConfig) -> Result<()> {
        let connector = self.factory.connector_for(&config)?;
        if connector.kind() != config.kind {
            return Err(FieldPulseError::InvalidInput(format!(
                "connector for {} is {} but system is configured as {}",
                config.config_id,
                connector.kind(),
                config.kind
            )));
        }

        info!(
            config_id = %config.config_id,
            system = %config.system_name,
            kind = %config.kind,
            "External system registered"
        );
        self.systems
            .write()
            .insert(config.config_id.clone(), RegisteredSystem { config, connector });
        Ok(())
    }

    /// Enable or disable a registered system.
    pub fn set_system_active(&self, config_id: &str, active: bool) -> Result<()> {
        let mut systems = self.systems.write();
        let system = systems
            .get_mut(config_id)
            .ok_or_else(|| FieldPulseError::NotFound(format!("external system {config_id}")))?;
        system.config.is_active = active;
        info!(config_id, active, "External system activity changed");
        Ok(())
    }

    /// Check every registered system. Errors count as unreachable.
    pub async fn test_all_connections(&self) -> BTreeMap<String, bool> {
        let mut results = BTreeMap::new();
        for (config_id, connector) in self.connectors(|_| true) {
            let ok = match connector.test_connection().await {
                Ok(ok) => ok,
                Err(err) => {
                    error!(
                        config_id = %config_id,
                        error_kind = err.label(),
                        error = %err,
                        "Connection test failed"
                    );
                    false
                }
            };
            results.insert(config_id, ok);
        }
        results
    }

    /// Sync every active system; inactive ones are skipped.
    pub async fn sync_all_systems(&self) -> BTreeMap<String, SyncOutcome> {
        let mut results = BTreeMap::new();
        for (config_id, _) in self.connectors(|c| c.is_active) {
            let outcome = match self.sync_system(&config_id).await {
                Ok(outcome) => outcome,
                Err(err) => SyncOutcome::failed(err.to_string()),
            };
            results.insert(config_id, outcome);
        }
        results
    }

    /// Pull data from one system and record synced sales facts.
    ///
    /// # Errors
    /// `NotFound` for an unknown system, `InvalidState` for an inactive one.
    /// Connector failures are reported in the returned outcome.
    pub async fn sync_system(&self, config_id: &str) -> Result<SyncOutcome> {
        let (config, connector) = {
            let systems = self.systems.read();
            let system = systems
                .get(config_id)
                .ok_or_else(|| FieldPulseError::NotFound(format!("external system {config_id}")))?;
            (system.config.clone(), Arc::clone(&system.connector))
        };
        if !config.is_active {
            warn!(config_id, "Sync requested for inactive system");
            return Err(FieldPulseError::InvalidState(format!(
                "external system {config_id} is inactive"
            )));
        }

        let now = self.clock.now();
        let since = config.last_sync.unwrap_or(now - Duration::days(INITIAL_SYNC_WINDOW_DAYS));
        let batch = match connector.sync_data(since).await {
            Ok(batch) => batch,
            Err(err) => {
                error!(config_id, error_kind = err.label(), error = %err, "Sync failed");
                return Ok(SyncOutcome::failed(err.to_string()));
            }
        };

        let mut outcome = SyncOutcome {
            success: true,
            customers_synced: batch.customers.len(),
            ..SyncOutcome::default()
        };
        for sale in batch.sales {
            let result_id = sale.result_id.clone();
            match self.reports.record_sales_result(sale) {
                Ok(()) => outcome.sales_synced += 1,
                Err(err) => outcome.errors.push(format!("sale {result_id}: {err}")),
            }
        }

        if let Some(system) = self.systems.write().get_mut(config_id) {
            system.config.last_sync = Some(now);
        }
        info!(
            config_id,
            customers = outcome.customers_synced,
            sales = outcome.sales_synced,
            "External system synced"
        );
        Ok(outcome)
    }

    /// Push a report as an activity to every active CRM system.
    ///
    /// Returns whether at least one system accepted it.
    pub async fn push_daily_report(&self, report: &DailyReport) -> bool {
        let record = OutboundRecord::Activity(CrmActivity::from(report));
        self.push_to_active(&record).await
    }

    /// Push an expense to every active accounting system.
    pub async fn push_expense(&self, expense: ExpenseRecord) -> bool {
        self.push_to_active(&OutboundRecord::Expense(expense)).await
    }

    /// Status of every registered system, probing each connection.
    pub async fn system_status(&self) -> Vec<SystemStatus> {
        let snapshot: Vec<(ExternalSystemConfig, Arc<dyn ExternalSystemConnector>)> = self
            .systems
            .read()
            .values()
            .map(|s| (s.config.clone(), Arc::clone(&s.connector)))
            .collect();

        let mut statuses = Vec::with_capacity(snapshot.len());
        for (config, connector) in snapshot {
            let connection_status = match connector.test_connection().await {
                Ok(true) => ConnectionStatus::Connected,
                Ok(false) => ConnectionStatus::Disconnected,
                Err(_) => ConnectionStatus::Error,
            };
            statuses.push(SystemStatus {
                config_id: config.config_id,
                system_name: config.system_name,
                kind: config.kind,
                is_active: config.is_active,
                last_sync: config.last_sync,
                sync_frequency: config.sync_frequency,
                connection_status,
            });
        }
        statuses
    }

    async fn push_to_active(&self, record: &OutboundRecord) -> bool {
        let kind = record.destination();
        let targets = self.connectors(|c| c.is_active && c.kind == kind);
        if targets.is_empty() {
            warn!(%kind, "No active system to push to");
            return false;
        }

        let mut delivered = 0;
        for (config_id, connector) in targets {
            match connector.push(record).await {
                Ok(()) => delivered += 1,
                Err(err) => error!(
                    config_id = %config_id,
                    error_kind = err.label(),
                    error = %err,
                    "Push failed"
                ),
            }
        }
        delivered > 0
    }

    fn connectors(
        &self,
        filter: impl Fn(&ExternalSystemConfig) -> bool,
    ) -> Vec<(String, Arc<dyn ExternalSystemConnector>)> {
        self.systems
            .read()
            .iter()
            .filter(|(_, s)| filter(&s.config))
            .map(|(id, s)| (id.clone(), Arc::clone(&s.connector)))
            .collect()
    }
}
