/// Wire types for the CRM and accounting REST APIs
use chrono::NaiveDate;
use fieldpulse_domain::{Customer, SalesResult, SalesStatus};
use serde::Deserialize;

/// `GET /customers` response body
#[derive(Debug, Clone, Deserialize)]
pub struct CustomersResponse {
    #[serde(default)]
    pub customers: Vec<CustomerPayload>,
}

/// Customer as the CRM sends it
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPayload {
    pub id: String,
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
    #[serde(default)]
    pub customer_type: Option<String>,
}

impl From<CustomerPayload> for Customer {
    fn from(payload: CustomerPayload) -> Self {
        Self {
            customer_id: payload.id,
            company_name: payload.company_name,
            contact_person: payload.contact_person,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            industry: payload.industry,
            customer_type: payload.customer_type.unwrap_or_else(|| "existing".to_string()),
        }
    }
}

/// `GET /sales` response body
#[derive(Debug, Clone, Deserialize)]
pub struct SalesResponse {
    #[serde(default)]
    pub sales: Vec<SalePayload>,
}

/// Sale as the accounting system sends it
#[derive(Debug, Clone, Deserialize)]
pub struct SalePayload {
    pub id: String,
    /// Owner of the sale; the accounting system may not know it
    #[serde(default = "unknown_owner")]
    pub sales_person_id: String,
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
    #[serde(default)]
    pub status: Option<String>,
}

fn unknown_owner() -> String {
    "unknown".to_string()
}

impl From<SalePayload> for SalesResult {
    fn from(payload: SalePayload) -> Self {
        // Accounting reports booked sales as `confirmed`, which is a contract here.
        let status = payload
            .status
            .as_deref()
            .and_then(|s| s.parse::<SalesStatus>().ok())
            .unwrap_or_default();

        Self {
            result_id: payload.id,
            owner_id: payload.sales_person_id,
            customer_id: payload.customer_id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            unit_price: payload.unit_price,
            total_amount: payload.total_amount,
            profit_amount: payload.profit_amount,
            sale_date: payload.sale_date,
            contract_date: None,
            delivery_date: None,
            status,
        }
    }
}
