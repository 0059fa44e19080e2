//! Spinstat wire formats
//!
//! This crate defines the two byte-level formats the head unit understands:
//!
//! - The **CSC Measurement** characteristic value (Bluetooth Cycling Speed &
//!   Cadence, characteristic 0x2A5B) as emitted by the bike's sensor. See
//!   [`csc`].
//! - The UART link between the BLE bridge co-processor and the RP2040. The
//!   bridge owns scanning, connection and subscription; it forwards every
//!   notification it receives inside a small binary frame:
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod csc;
pub mod frame;
pub mod messages;

pub use csc::{decode, DecodeError, Sample, MIN_FRAME_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, HostMessage, LinkStatus};
