//! Accounting connector
//!
//! Pulls confirmed sales and receives travel expenses from daily reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fieldpulse_core::ExternalSystemConnector;
use fieldpulse_domain::{
    ExternalSystemConfig, ExternalSystemKind, FieldPulseError, OutboundRecord, Result,
    SalesResult, SyncBatch,
};
use reqwest::{Method, StatusCode};
use tracing::{info, warn};

use super::types::SalesResponse;
use super::{bearer, endpoint_url};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Only booked sales are pulled.
const SALES_STATUS_FILTER: &str = "confirmed";

/// HTTP adapter for an accounting system
pub struct HttpAccountingConnector {
    http_client: HttpClient,
    config: ExternalSystemConfig,
}

impl HttpAccountingConnector {
    pub fn new(config: ExternalSystemConfig, http_client: HttpClient) -> Self {
        Self { http_client, config }
    }

    async fn fetch_sales(&self, since: DateTime<Utc>) -> Result<Vec<SalesResult>> {
        let since_date = since.date_naive().format("%Y-%m-%d").to_string();
        let request = self
            .http_client
            .request(Method::GET, endpoint_url(&self.config, "sales"))
            .header("Authorization", bearer(&self.config))
            .query(&[("since", since_date.as_str()), ("status", SALES_STATUS_FILTER)]);

        let response = self.http_client.send_checked(request).await?;
        let body: SalesResponse = response.json().await.map_err(InfraError::from)?;

        Ok(body.sales.into_iter().map(SalesResult::from).collect())
    }
}

#[async_trait]
impl ExternalSystemConnector for HttpAccountingConnector {
    fn kind(&self) -> ExternalSystemKind {
        ExternalSystemKind::Accounting
    }

    async fn test_connection(&self) -> Result<bool> {
        let request = self
            .http_client
            .request(Method::GET, endpoint_url(&self.config, "status"))
            .header("Authorization", bearer(&self.config));

        let response = self.http_client.send(request).await?;
        let status = response.status();

        if status == StatusCode::OK {
            info!(system = %self.config.system_name, "Accounting connection healthy");
            Ok(true)
        } else {
            warn!(system = %self.config.system_name, %status, "Accounting status check failed");
            Ok(false)
        }
    }

    async fn sync_data(&self, since: DateTime<Utc>) -> Result<SyncBatch> {
        let sales = self.fetch_sales(since).await?;
        info!(
            system = %self.config.system_name,
            sales = sales.len(),
            "Accounting sales sync complete"
        );

        Ok(SyncBatch { customers: Vec::new(), sales })
    }

    async fn push(&self, record: &OutboundRecord) -> Result<()> {
        let OutboundRecord::Expense(expense) = record else {
            return Err(FieldPulseError::InvalidInput(format!(
                "accounting system {} accepts expenses only",
                self.config.system_name
            )));
        };

        let request = self
            .http_client
            .request(Method::POST, endpoint_url(&self.config, "expenses"))
            .header("Authorization", bearer(&self.config))
            .json(expense);

        self.http_client.send_checked(request).await?;
        info!(
            system = %self.config.system_name,
            expense_id = %expense.expense_id,
            "Pushed expense to accounting"
        );
        Ok(())
    }
}
