//! Alert derivation

pub mod engine;

pub use engine::*;
