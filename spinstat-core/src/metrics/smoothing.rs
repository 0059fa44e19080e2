//! Exponential moving average

/// Fold `instant` into `previous` with weight `alpha` on the new reading
///
/// With no previous value the reading is taken as-is.
#[inline]
pub fn ema(previous: Option<f64>, instant: f64, alpha: f64) -> f64 {
    match previous {
        Some(prev) => prev * (1.0 - alpha) + instant * alpha,
        None => instant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_reading_passes_through() {
        assert_eq!(ema(None, 72.0, 0.1), 72.0);
    }

    #[test]
    fn test_weighting() {
        let value = ema(Some(100.0), 0.0, 0.1);
        assert!((value - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_alpha_one_tracks_input() {
        assert_eq!(ema(Some(12.0), 30.0, 1.0), 30.0);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut value = Some(0.0);
        for _ in 0..400 {
            value = Some(ema(value, 25.0, 0.1));
        }
        assert!((value.unwrap() - 25.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn test_each_step_closes_gap(
            start in -500.0f64..500.0,
            target in -500.0f64..500.0,
            alpha in 0.01f64..0.99,
        ) {
            prop_assume!((start - target).abs() > 1e-6);
            let next = ema(Some(start), target, alpha);
            prop_assert!((next - target).abs() < (start - target).abs());
        }
    }
}
