//! External system integrations
//!
//! HTTP adapters for the `ExternalSystemConnector` port. Both systems speak
//! JSON over bearer-authenticated REST endpoints rooted at the configured
//! `api_endpoint`.

pub mod accounting;
pub mod crm;
pub mod factory;
pub mod types;

pub use accounting::HttpAccountingConnector;
pub use crm::HttpCrmConnector;
pub use factory::HttpConnectorFactory;

use fieldpulse_domain::ExternalSystemConfig;

/// Join the configured endpoint and a path without doubling the slash.
fn endpoint_url(config: &ExternalSystemConfig, path: &str) -> String {
    format!("{}/{}", config.api_endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn bearer(config: &ExternalSystemConfig) -> String {
    format!("Bearer {}", config.api_key)
}
