//! Per-owner dashboard composition

pub mod service;

pub use service::*;
