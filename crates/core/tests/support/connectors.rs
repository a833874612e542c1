//! Scripted connectors for integration service tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fieldpulse_core::{ConnectorFactory, ExternalSystemConnector};
use fieldpulse_domain::{
    ExternalSystemConfig, ExternalSystemKind, FieldPulseError, OutboundRecord,
    Result as DomainResult, SyncBatch,
};
use parking_lot::Mutex;

/// Connector returning canned responses and recording calls.
pub struct ScriptedConnector {
    kind: ExternalSystemKind,
    healthy: bool,
    batch: Option<SyncBatch>,
    fail_push: bool,
    pub pushed: Mutex<Vec<OutboundRecord>>,
    pub sync_calls: Mutex<Vec<DateTime<Utc>>>,
}

impl ScriptedConnector {
    pub fn new(kind: ExternalSystemKind) -> Self {
        Self {
            kind,
            healthy: true,
            batch: Some(SyncBatch::default()),
            fail_push: false,
            pushed: Mutex::new(Vec::new()),
            sync_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_batch(mut self, batch: SyncBatch) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Make `sync_data` fail with a network error.
    pub fn failing_sync(mut self) -> Self {
        self.batch = None;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }
}

#[async_trait]
impl ExternalSystemConnector for ScriptedConnector {
    fn kind(&self) -> ExternalSystemKind {
        self.kind
    }

    async fn test_connection(&self) -> DomainResult<bool> {
        Ok(self.healthy)
    }

    async fn sync_data(&self, since: DateTime<Utc>) -> DomainResult<SyncBatch> {
        self.sync_calls.lock().push(since);
        self.batch.clone().ok_or_else(|| FieldPulseError::Network("connection refused".into()))
    }

    async fn push(&self, record: &OutboundRecord) -> DomainResult<()> {
        if self.fail_push {
            return Err(FieldPulseError::Network("HTTP 503".into()));
        }
        self.pushed.lock().push(record.clone());
        Ok(())
    }
}

/// Factory handing out pre-built connectors by config id.
#[derive(Default)]
pub struct ScriptedFactory {
    connectors: Mutex<Vec<(String, Arc<ScriptedConnector>)>>,
}

impl ScriptedFactory {
    pub fn with(self, config_id: &str, connector: Arc<ScriptedConnector>) -> Self {
        self.connectors.lock().push((config_id.to_string(), connector));
        self
    }
}

impl ConnectorFactory for ScriptedFactory {
    fn connector_for(
        &self,
        config: &ExternalSystemConfig,
    ) -> DomainResult<Arc<dyn ExternalSystemConnector>> {
        self.connectors
            .lock()
            .iter()
            .find(|(id, _)| id == &config.config_id)
            .map(|(_, c)| Arc::clone(c) as Arc<dyn ExternalSystemConnector>)
            .ok_or_else(|| FieldPulseError::Config(format!("no connector for {}", config.config_id)))
    }
}
