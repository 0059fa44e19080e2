//! Telemetry pipeline
//!
//! Raw measurement bytes in, snapshots out. A frame that fails to decode is
//! counted and dropped; the engine and the last good snapshot are untouched,
//! so the display keeps showing the previous reading.

use spinstat_protocol::{decode, DecodeError};

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::{EnginePhase, MetricsEngine, StatsSnapshot};

/// Decoder and metrics engine glued together
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    engine: MetricsEngine,
    accepted: u32,
    rejected: u32,
}

impl Telemetry {
    /// Create a pipeline with the given engine configuration
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: MetricsEngine::new(config)?,
            accepted: 0,
            rejected: 0,
        })
    }

    /// Decode one measurement and feed it to the engine
    ///
    /// `Ok(None)` means the frame was good but it was the first one, so no
    /// metrics exist yet.
    pub fn ingest(&mut self, raw: &[u8]) -> Result<Option<StatsSnapshot>, DecodeError> {
        let sample = decode(raw).inspect_err(|_| {
            self.rejected = self.rejected.wrapping_add(1);
        })?;

        self.accepted = self.accepted.wrapping_add(1);
        Ok(self.engine.update(sample))
    }

    /// Last snapshot produced, kept across bad frames
    pub fn last_snapshot(&self) -> Option<StatsSnapshot> {
        self.engine.snapshot()
    }

    /// Frames that decoded successfully
    pub fn accepted_frames(&self) -> u32 {
        self.accepted
    }

    /// Frames dropped by the decoder
    pub fn rejected_frames(&self) -> u32 {
        self.rejected
    }

    /// Engine lifecycle phase
    pub fn phase(&self) -> EnginePhase {
        self.engine.phase()
    }

    /// Underlying engine
    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinstat_protocol::Sample;

    fn frame(wheel_revolutions: u32, wheel_event_time: u16) -> [u8; 11] {
        Sample {
            has_wheel: true,
            has_crank: true,
            wheel_revolutions,
            wheel_event_time,
            crank_revolutions: (wheel_revolutions / 3) as u16,
            crank_event_time: wheel_event_time,
        }
        .encode()
    }

    #[test]
    fn test_first_frame_bootstraps() {
        let mut telemetry = Telemetry::default();
        assert_eq!(telemetry.phase(), EnginePhase::Uninitialized);

        assert_eq!(telemetry.ingest(&frame(1000, 0)), Ok(None));
        assert_eq!(telemetry.phase(), EnginePhase::Bootstrapped);
        assert_eq!(telemetry.accepted_frames(), 1);
        assert!(telemetry.last_snapshot().is_none());
    }

    #[test]
    fn test_second_frame_yields_snapshot() {
        let config = EngineConfig::default().with_wheel_size_m(2.0);
        let mut telemetry = Telemetry::new(config).unwrap();

        telemetry.ingest(&frame(1000, 0)).unwrap();
        let snapshot = telemetry.ingest(&frame(1010, 1024)).unwrap().unwrap();

        assert!((snapshot.speed_kmh - 72.0).abs() < 1e-9);
        assert_eq!(telemetry.last_snapshot(), Some(snapshot));
    }

    #[test]
    fn test_bad_frame_holds_last_value() {
        let mut telemetry = Telemetry::default();
        telemetry.ingest(&frame(1000, 0)).unwrap();
        let good = telemetry.ingest(&frame(1010, 1024)).unwrap();
        let previous = telemetry.engine().previous_sample().copied();

        let err = telemetry.ingest(&[0x03, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(err, Err(DecodeError::TooShort { len: 5 }));

        assert_eq!(telemetry.rejected_frames(), 1);
        assert_eq!(telemetry.accepted_frames(), 2);
        assert_eq!(telemetry.last_snapshot(), good);
        assert_eq!(telemetry.engine().previous_sample().copied(), previous);
    }

    #[test]
    fn test_bad_frame_before_first_sample() {
        let mut telemetry = Telemetry::default();
        assert!(telemetry.ingest(&[]).is_err());
        assert_eq!(telemetry.phase(), EnginePhase::Uninitialized);
        assert_eq!(telemetry.rejected_frames(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_smoothing_factor(0.0);
        assert_eq!(
            Telemetry::new(config).unwrap_err(),
            ConfigError::InvalidSmoothingFactor
        );
    }
}
