//! Entity store adapters
//!
//! Implementations of the core repository ports. Only the in-memory store
//! ships today; persistent backends plug in behind the same traits.

pub mod memory;

pub use memory::InMemoryStore;
