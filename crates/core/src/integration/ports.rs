//! Port interfaces for external systems

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fieldpulse_domain::{
    ExternalSystemConfig, ExternalSystemKind, OutboundRecord, Result, SyncBatch,
};

/// Capability set of one external system
#[async_trait]
pub trait ExternalSystemConnector: Send + Sync {
    /// Kind of system behind this connector
    fn kind(&self) -> ExternalSystemKind;

    /// Check the system; `Ok(false)` means reachable but unhealthy
    async fn test_connection(&self) -> Result<bool>;

    /// Pull records changed since `since`
    async fn sync_data(&self, since: DateTime<Utc>) -> Result<SyncBatch>;

    /// Send one record to the system
    ///
    /// # Errors
    /// `InvalidInput` when the record is not accepted by this kind of system.
    async fn push(&self, record: &OutboundRecord) -> Result<()>;
}

/// Builds connectors for registered systems
pub trait ConnectorFactory: Send + Sync {
    /// Build a connector for the configured system type
    fn connector_for(&self, config: &ExternalSystemConfig)
        -> Result<Arc<dyn ExternalSystemConnector>>;
}
