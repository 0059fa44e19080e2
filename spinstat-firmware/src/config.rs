//! Bike configuration
//!
//! Constants are generated by build.rs from bike.toml.

use spinstat_core::config::EngineConfig;

include!(concat!(env!("OUT_DIR"), "/bike_config.rs"));

/// Engine configuration built from bike.toml
pub fn engine_config() -> EngineConfig {
    EngineConfig::default()
        .with_wheel_size_m(WHEEL_SIZE_M)
        .with_smoothing_factor(SMOOTHING_FACTOR)
}
