//! Metrics engine configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default wheel circumference in metres (700x25c road tyre)
pub const DEFAULT_WHEEL_SIZE_M: f64 = 2.105;

/// Default exponential smoothing weight for the newest reading
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.1;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Wheel circumference is zero, negative, or not finite
    InvalidWheelSize,
    /// Smoothing factor outside (0, 1]
    InvalidSmoothingFactor,
}

/// Metrics engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Wheel circumference (m)
    pub wheel_size_m: f64,
    /// Weight of the newest reading in the moving average, in (0, 1]
    ///
    /// 1.0 disables smoothing.
    pub smoothing_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wheel_size_m: DEFAULT_WHEEL_SIZE_M,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Set the wheel circumference
    pub fn with_wheel_size_m(mut self, wheel_size_m: f64) -> Self {
        self.wheel_size_m = wheel_size_m;
        self
    }

    /// Set the smoothing factor
    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    /// Check that both values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.wheel_size_m.is_finite() && self.wheel_size_m > 0.0) {
            return Err(ConfigError::InvalidWheelSize);
        }
        // Written so that NaN fails as well
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::InvalidSmoothingFactor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.wheel_size_m, 2.105);
        assert_eq!(config.smoothing_factor, 0.1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_wheel_size_rejected() {
        for size in [0.0, -2.1, f64::NAN, f64::INFINITY] {
            let config = EngineConfig::default().with_wheel_size_m(size);
            assert_eq!(config.validate(), Err(ConfigError::InvalidWheelSize));
        }
    }

    #[test]
    fn test_smoothing_factor_bounds() {
        let ok = EngineConfig::default().with_smoothing_factor(1.0);
        assert_eq!(ok.validate(), Ok(()));

        for alpha in [0.0, -0.1, 1.01, f64::NAN] {
            let config = EngineConfig::default().with_smoothing_factor(alpha);
            assert_eq!(config.validate(), Err(ConfigError::InvalidSmoothingFactor));
        }
    }
}
