//! Sales facts consumed by the report and target engines
//!
//! These records are append-only: the core stores and reads them but never
//! mutates them after they are recorded.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Pipeline status of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesStatus {
    Quoted,
    #[default]
    Contracted,
    Delivered,
    Completed,
}

impl_domain_status_conversions!(SalesStatus {
    Quoted => "quoted",
    Contracted => "contracted",
    Delivered => "delivered",
    Completed => "completed",
});

/// Recorded sale
///
/// Numeric fields default to zero when missing from an external payload so a
/// partial fact contributes nothing instead of failing aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesResult {
    pub result_id: String,
    pub owner_id: String,
    pub customer_id: String,
    pub product_id: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub unit_price: u64,
    #[serde(default)]
    pub total_amount: u64,
    #[serde(default)]
    pub profit_amount: u64,
    pub sale_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: SalesStatus,
}

impl SalesResult {
    /// Build a contracted sale with a fresh UUIDv7 id.
    ///
    /// `total_amount` is derived from quantity and unit price.
    pub fn new(
        owner_id: impl Into<String>,
        customer_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: u64,
        unit_price: u64,
        sale_date: NaiveDate,
    ) -> Self {
        Self {
            result_id: uuid::Uuid::now_v7().to_string(),
            owner_id: owner_id.into(),
            customer_id: customer_id.into(),
            product_id: product_id.into(),
            quantity,
            unit_price,
            total_amount: quantity.saturating_mul(unit_price),
            profit_amount: 0,
            sale_date,
            contract_date: None,
            delivery_date: None,
            status: SalesStatus::Contracted,
        }
    }

    pub fn with_id(mut self, result_id: impl Into<String>) -> Self {
        self.result_id = result_id.into();
        self
    }

    pub fn with_profit(mut self, profit_amount: u64) -> Self {
        self.profit_amount = profit_amount;
        self
    }

    pub fn with_total(mut self, total_amount: u64) -> Self {
        self.total_amount = total_amount;
        self
    }
}

/// Customer visit recorded by a sales rep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: String,
    pub owner_id: String,
    pub customer_id: String,
    /// Local wall-clock time of the visit
    pub visited_at: NaiveDateTime,
    pub purpose: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub discussion_points: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub next_action: String,
    #[serde(default)]
    pub products_discussed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
}

impl Visit {
    pub fn new(
        owner_id: impl Into<String>,
        customer_id: impl Into<String>,
        visited_at: NaiveDateTime,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            visit_id: uuid::Uuid::now_v7().to_string(),
            owner_id: owner_id.into(),
            customer_id: customer_id.into(),
            visited_at,
            purpose: purpose.into(),
            participants: Vec::new(),
            discussion_points: String::new(),
            outcome: String::new(),
            next_action: String::new(),
            products_discussed: Vec::new(),
            follow_up_date: None,
        }
    }

    pub fn with_id(mut self, visit_id: impl Into<String>) -> Self {
        self.visit_id = visit_id.into();
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    /// Calendar day the visit belongs to.
    pub fn visit_date(&self) -> NaiveDate {
        self.visited_at.date()
    }
}

/// Customer record pulled from a CRM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub company_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub industry: String,
    /// `new` or `existing`
    #[serde(default = "default_customer_type")]
    pub customer_type: String,
}

fn default_customer_type() -> String {
    "existing".to_string()
}
