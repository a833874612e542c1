//! External system integration
//!
//! CRM and accounting systems sit behind [`ports::ExternalSystemConnector`];
//! the service only ever talks to that trait.

pub mod ports;
pub mod service;

pub use ports::*;
pub use service::*;
