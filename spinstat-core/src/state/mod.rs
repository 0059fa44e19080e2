//! View state machine
//!
//! Selects what the panel shows. Driven by the four keys and by link status
//! changes reported by the bridge.

pub mod events;
pub mod machine;

pub use events::{Button, Event};
pub use machine::{Metric, View};
