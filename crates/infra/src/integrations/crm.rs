//! CRM connector
//!
//! Pulls customers changed since the last sync and receives daily reports as
//! sales activities.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use fieldpulse_core::ExternalSystemConnector;
use fieldpulse_domain::{
    Customer, ExternalSystemConfig, ExternalSystemKind, FieldPulseError, OutboundRecord, Result,
    SyncBatch,
};
use reqwest::{Method, StatusCode};
use tracing::{info, warn};

use super::types::CustomersResponse;
use super::{bearer, endpoint_url};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// HTTP adapter for a CRM system
pub struct HttpCrmConnector {
    http_client: HttpClient,
    config: ExternalSystemConfig,
}

impl HttpCrmConnector {
    pub fn new(config: ExternalSystemConfig, http_client: HttpClient) -> Self {
        Self { http_client, config }
    }

    async fn fetch_customers(&self, since: DateTime<Utc>) -> Result<Vec<Customer>> {
        let updated_since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let request = self
            .http_client
            .request(Method::GET, endpoint_url(&self.config, "customers"))
            .header("Authorization", bearer(&self.config))
            .query(&[("updated_since", updated_since.as_str())]);

        let response = self.http_client.send_checked(request).await?;
        let body: CustomersResponse = response.json().await.map_err(InfraError::from)?;

        Ok(body.customers.into_iter().map(Customer::from).collect())
    }
}

#[async_trait]
impl ExternalSystemConnector for HttpCrmConnector {
    fn kind(&self) -> ExternalSystemKind {
        ExternalSystemKind::Crm
    }

    async fn test_connection(&self) -> Result<bool> {
        let request = self
            .http_client
            .request(Method::GET, endpoint_url(&self.config, "health"))
            .header("Authorization", bearer(&self.config));

        let response = self.http_client.send(request).await?;
        let status = response.status();

        if status == StatusCode::OK {
            info!(system = %self.config.system_name, "CRM connection healthy");
            Ok(true)
        } else {
            warn!(system = %self.config.system_name, %status, "CRM health check failed");
            Ok(false)
        }
    }

    async fn sync_data(&self, since: DateTime<Utc>) -> Result<SyncBatch> {
        let customers = self.fetch_customers(since).await?;
        info!(
            system = %self.config.system_name,
            customers = customers.len(),
            "CRM customer sync complete"
        );

        Ok(SyncBatch { customers, sales: Vec::new() })
    }

    async fn push(&self, record: &OutboundRecord) -> Result<()> {
        let OutboundRecord::Activity(activity) = record else {
            return Err(FieldPulseError::InvalidInput(format!(
                "CRM {} accepts activities only",
                self.config.system_name
            )));
        };

        let request = self
            .http_client
            .request(Method::POST, endpoint_url(&self.config, "activities"))
            .header("Authorization", bearer(&self.config))
            .json(activity);

        self.http_client.send_checked(request).await?;
        info!(
            system = %self.config.system_name,
            activity_id = %activity.activity_id,
            "Pushed activity to CRM"
        );
        Ok(())
    }
}
