//! Rolling metrics engine
//!
//! Turns consecutive CSC samples into cadence, speed and distance.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──first sample──▶ Bootstrapped ──every sample──▶ Bootstrapped
//! ```
//!
//! The first sample only fixes the distance baseline: a single reading has
//! no deltas. Every later sample yields a snapshot.
//!
//! # Missing data
//!
//! Speed and cadence fall to zero when a frame lacks the matching data and
//! are smoothed toward it. Distance is a cumulative quantity and keeps its
//! last wheel-derived value instead.

use spinstat_protocol::Sample;

use super::smoothing::ema;
use crate::config::{ConfigError, EngineConfig};
use crate::counter::{
    event_time_delta_s, forward_delta, CRANK_REVOLUTION_MODULUS, WHEEL_REVOLUTION_MODULUS,
};

/// Divisor applied to `revolutions × wheel size` to get the reported distance unit
pub const DISTANCE_DIVISOR: f64 = 1_000_000.0;

/// m/s to km/h
const MPS_TO_KMH: f64 = 3.6;

/// Output of one update cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    /// Smoothed crank cadence (RPM)
    pub cadence_rpm: f64,
    /// Distance since the first sample (km), not smoothed
    pub distance_km: f64,
    /// Smoothed speed (km/h)
    pub speed_kmh: f64,
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnginePhase {
    /// No sample seen yet
    Uninitialized,
    /// Baseline fixed; every sample produces a snapshot
    Bootstrapped,
}

/// Metrics engine
///
/// Holds exactly one step of history. Not reentrant: it is owned by a single
/// update loop and fed one decoded sample per received frame.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    config: EngineConfig,
    previous_sample: Option<Sample>,
    start_distance_km: f64,
    smoothed: Option<StatsSnapshot>,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::with_valid_config(EngineConfig::default())
    }
}

impl MetricsEngine {
    /// Create an engine, rejecting an unusable configuration
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EngineConfig) -> Self {
        Self {
            config,
            previous_sample: None,
            start_distance_km: 0.0,
            smoothed: None,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> EnginePhase {
        if self.previous_sample.is_some() {
            EnginePhase::Bootstrapped
        } else {
            EnginePhase::Uninitialized
        }
    }

    /// Latest snapshot, if two samples have been seen
    pub fn snapshot(&self) -> Option<StatsSnapshot> {
        self.smoothed
    }

    /// Distance baseline taken from the first sample
    pub fn start_distance_km(&self) -> f64 {
        self.start_distance_km
    }

    /// Sample the next update will be measured against
    pub fn previous_sample(&self) -> Option<&Sample> {
        self.previous_sample.as_ref()
    }

    /// Feed the next decoded sample
    ///
    /// Returns `None` for the very first sample (nothing to compare against
    /// yet), and the updated snapshot for every later one.
    pub fn update(&mut self, sample: Sample) -> Option<StatsSnapshot> {
        let Some(previous) = self.previous_sample.replace(sample) else {
            self.start_distance_km = self.cumulative_distance_km(sample.wheel_revolutions);
            return None;
        };

        let instant = self.instantaneous(&previous, &sample);
        let alpha = self.config.smoothing_factor;
        let last = self.smoothed;

        let snapshot = StatsSnapshot {
            cadence_rpm: ema(last.map(|s| s.cadence_rpm), instant.cadence_rpm, alpha),
            speed_kmh: ema(last.map(|s| s.speed_kmh), instant.speed_kmh, alpha),
            distance_km: instant
                .distance_km
                .or(last.map(|s| s.distance_km))
                .unwrap_or(0.0),
        };

        self.smoothed = Some(snapshot);
        Some(snapshot)
    }

    fn cumulative_distance_km(&self, wheel_revolutions: u32) -> f64 {
        wheel_revolutions as f64 * self.config.wheel_size_m / DISTANCE_DIVISOR
    }

    fn instantaneous(&self, previous: &Sample, current: &Sample) -> Reading {
        let mut instant = Reading::default();

        if current.has_wheel {
            let time_s = event_time_delta_s(current.wheel_event_time, previous.wheel_event_time);
            let revolutions = forward_delta(
                current.wheel_revolutions as u64,
                previous.wheel_revolutions as u64,
                WHEEL_REVOLUTION_MODULUS,
            );
            let sample_distance_m = revolutions as f64 * self.config.wheel_size_m;

            if time_s != 0.0 {
                instant.speed_kmh = sample_distance_m / time_s * MPS_TO_KMH;
            }
            instant.distance_km = Some(
                self.cumulative_distance_km(current.wheel_revolutions) - self.start_distance_km,
            );
        }

        if current.has_crank {
            let time_s = event_time_delta_s(current.crank_event_time, previous.crank_event_time);
            let revolutions = forward_delta(
                current.crank_revolutions as u64,
                previous.crank_revolutions as u64,
                CRANK_REVOLUTION_MODULUS,
            );

            if time_s != 0.0 {
                instant.cadence_rpm = 60.0 * revolutions as f64 / time_s;
            }
        }

        instant
    }
}

/// Unsmoothed readings for one pair of samples
#[derive(Debug, Default)]
struct Reading {
    cadence_rpm: f64,
    speed_kmh: f64,
    /// None when the frame carried no wheel data
    distance_km: Option<f64>,
}
