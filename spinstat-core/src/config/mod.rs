//! Configuration types
//!
//! Board-agnostic configuration for the metrics engine. The firmware fills
//! these from `bike.toml` at build time.

pub mod engine;

pub use engine::*;
