//! # FieldPulse Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - In-memory entity store
//! - HTTP client and CRM/accounting connectors
//! - Configuration loading
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `fieldpulse-core`
//! - Depends on `fieldpulse-domain` and `fieldpulse-core`
//! - Contains all "impure" code (I/O, environment, network)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;
pub mod store;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::{HttpAccountingConnector, HttpConnectorFactory, HttpCrmConnector};
pub use observability::init_tracing;
pub use store::InMemoryStore;
