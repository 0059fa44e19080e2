//! Board-agnostic core logic for the Spinstat head unit
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wrapping counter arithmetic for CSC revolution counters and event timers
//! - Metrics engine (cadence, speed, distance with exponential smoothing)
//! - Engine configuration types
//! - View state machine driven by buttons and link status
//! - Telemetry pipeline from raw measurement bytes to snapshots

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod counter;
pub mod metrics;
pub mod state;
pub mod telemetry;
