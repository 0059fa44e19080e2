//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use spinstat_core::metrics::StatsSnapshot;
use spinstat_core::state::Event;
use spinstat_protocol::{HostMessage, LinkStatus, MAX_PAYLOAD_SIZE};

/// Channel capacity for raw measurements
const MEASUREMENT_CHANNEL_SIZE: usize = 4;

/// Channel capacity for view events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for messages to the bridge
const HOST_CHANNEL_SIZE: usize = 4;

/// Raw CSC measurement as forwarded by the bridge
pub type Measurement = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Measurements from the bridge, consumed by the telemetry task
pub static MEASUREMENT_CHANNEL: Channel<
    CriticalSectionRawMutex,
    Measurement,
    MEASUREMENT_CHANNEL_SIZE,
> = Channel::new();

/// View events (link changes, key presses), consumed by the display task
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Messages queued for the bridge
pub static HOST_CHANNEL: Channel<CriticalSectionRawMutex, HostMessage, HOST_CHANNEL_SIZE> =
    Channel::new();

/// Latest metrics (updated by telemetry task)
pub static SNAPSHOT: Signal<CriticalSectionRawMutex, StatsSnapshot> = Signal::new();

/// Latest link status reported by the bridge
pub static LINK_STATUS: Signal<CriticalSectionRawMutex, LinkStatus> = Signal::new();
