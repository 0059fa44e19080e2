//! Cadence, speed and distance from CSC samples

pub mod engine;
pub mod smoothing;

pub use engine::{EnginePhase, MetricsEngine, StatsSnapshot};
