//! Connector factory backed by one shared HTTP client

use std::sync::Arc;

use fieldpulse_core::{ConnectorFactory, ExternalSystemConnector};
use fieldpulse_domain::{ExternalSystemConfig, ExternalSystemKind, IntegrationSettings, Result};
use tracing::debug;

use super::{HttpAccountingConnector, HttpCrmConnector};
use crate::http::HttpClient;

/// Builds HTTP connectors for registered systems.
///
/// All connectors share the connection pool of a single [`HttpClient`]
/// configured from [`IntegrationSettings`].
#[derive(Clone)]
pub struct HttpConnectorFactory {
    http_client: HttpClient,
}

impl HttpConnectorFactory {
    /// # Errors
    /// Returns `FieldPulseError::Network` if the HTTP client cannot be built.
    pub fn new(settings: &IntegrationSettings) -> Result<Self> {
        Ok(Self { http_client: HttpClient::from_settings(settings)? })
    }

    pub fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

impl ConnectorFactory for HttpConnectorFactory {
    fn connector_for(
        &self,
        config: &ExternalSystemConfig,
    ) -> Result<Arc<dyn ExternalSystemConnector>> {
        debug!(config_id = %config.config_id, kind = %config.kind, "Building connector");

        let client = self.http_client.clone();
        let connector: Arc<dyn ExternalSystemConnector> = match config.kind {
            ExternalSystemKind::Crm => Arc::new(HttpCrmConnector::new(config.clone(), client)),
            ExternalSystemKind::Accounting => {
                Arc::new(HttpAccountingConnector::new(config.clone(), client))
            }
        };
        Ok(connector)
    }
}
