//! Forward-looking target analysis

pub mod gap;

pub use gap::*;
