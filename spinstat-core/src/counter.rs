//! Wrapping counter arithmetic
//!
//! CSC sensors report cumulative counters that roll over silently. Deltas
//! between two consecutive readings are always taken forward, assuming at
//! most one rollover between them. At 1–2 s between frames that holds for
//! every counter the profile defines (the event timers wrap after 64 s).

/// Wheel revolution counter period (32-bit)
pub const WHEEL_REVOLUTION_MODULUS: u64 = 1 << 32;

/// Crank revolution counter period (16-bit)
pub const CRANK_REVOLUTION_MODULUS: u64 = 1 << 16;

/// Event time counter period (16-bit, 1/1024 s ticks)
pub const EVENT_TIME_MODULUS: u64 = 1 << 16;

/// Event time resolution
pub const EVENT_TICKS_PER_SECOND: u64 = 1024;

/// Forward distance from `previous` to `current` on a counter wrapping at `modulus`
///
/// Both readings must lie in `[0, modulus)`; the result does too.
pub fn forward_delta(current: u64, previous: u64, modulus: u64) -> u64 {
    debug_assert!(current < modulus && previous < modulus);

    if current >= previous {
        current - previous
    } else {
        (modulus - previous) + current
    }
}

/// Elapsed seconds between two event timestamps
pub fn event_time_delta_s(current: u16, previous: u16) -> f64 {
    let ticks = forward_delta(current as u64, previous as u64, EVENT_TIME_MODULUS);
    ticks as f64 / EVENT_TICKS_PER_SECOND as f64
}
