//! Observability infrastructure
//!
//! Structured logging is emitted through `tracing`; this module owns the
//! subscriber that renders those events. Services never install a
//! subscriber themselves, the binary embedding FieldPulse calls
//! [`init_tracing`] once at startup.

pub mod logging;

pub use logging::{build_filter, init_tracing};
