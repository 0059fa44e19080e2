//! Message types for the bridge link
//!
//! Message types are divided into two categories:
//! - Bridge → Host: forwarded CSC notifications, link status, heartbeat
//! - Host → Bridge: heartbeat responses, rescan requests

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Bridge → Host
pub const MSG_MEASUREMENT: u8 = 0x01;
pub const MSG_STATUS: u8 = 0x02;
pub const MSG_PING: u8 = 0x03;

// Message type IDs: Host → Bridge
pub const MSG_PONG: u8 = 0x20;
pub const MSG_RESCAN: u8 = 0x21;

// Link status wire values
const STATUS_SCANNING: u8 = 0x00;
const STATUS_CONNECTED: u8 = 0x01;
const STATUS_DISCONNECTED: u8 = 0x02;
const STATUS_NOT_FOUND: u8 = 0x03;

/// Connection state of the sensor as reported by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Scan in progress
    Scanning,
    /// Subscribed to CSC measurement notifications
    Connected,
    /// Connection dropped, bridge will rescan
    Disconnected,
    /// Scan window elapsed without finding the bike
    NotFound {
        /// Number of scans that came up empty so far
        attempts: u16,
    },
}

impl LinkStatus {
    /// Returns true if measurements can be expected
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkStatus::Connected)
    }

    fn parse(payload: &[u8]) -> Result<Self, FrameError> {
        match payload {
            [STATUS_SCANNING, ..] => Ok(LinkStatus::Scanning),
            [STATUS_CONNECTED, ..] => Ok(LinkStatus::Connected),
            [STATUS_DISCONNECTED, ..] => Ok(LinkStatus::Disconnected),
            [STATUS_NOT_FOUND, lo, hi, ..] => Ok(LinkStatus::NotFound {
                attempts: u16::from_le_bytes([*lo, *hi]),
            }),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    fn to_bytes(self) -> ([u8; 3], usize) {
        match self {
            LinkStatus::Scanning => ([STATUS_SCANNING, 0, 0], 1),
            LinkStatus::Connected => ([STATUS_CONNECTED, 0, 0], 1),
            LinkStatus::Disconnected => ([STATUS_DISCONNECTED, 0, 0], 1),
            LinkStatus::NotFound { attempts } => {
                let [lo, hi] = attempts.to_le_bytes();
                ([STATUS_NOT_FOUND, lo, hi], 3)
            }
        }
    }
}

/// Messages from the bridge to the head unit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    /// Raw CSC measurement characteristic value
    Measurement(Vec<u8, MAX_PAYLOAD_SIZE>),
    /// Sensor link state changed
    Status(LinkStatus),
    /// Heartbeat request
    Ping,
}

impl BridgeMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_MEASUREMENT => Ok(BridgeMessage::Measurement(frame.payload.clone())),
            MSG_STATUS => LinkStatus::parse(&frame.payload).map(BridgeMessage::Status),
            MSG_PING => Ok(BridgeMessage::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this message into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Measurement(value) => Frame::new(MSG_MEASUREMENT, value),
            BridgeMessage::Status(status) => {
                let (bytes, len) = status.to_bytes();
                Frame::new(MSG_STATUS, &bytes[..len])
            }
            BridgeMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

/// Messages from the head unit to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Heartbeat response
    Pong,
    /// Ask the bridge to drop the current search and start a new scan
    Rescan,
}

impl HostMessage {
    /// Encode this message into a frame
    pub fn to_frame(self) -> Frame {
        match self {
            HostMessage::Pong => Frame::empty(MSG_PONG),
            HostMessage::Rescan => Frame::empty(MSG_RESCAN),
        }
    }

    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PONG => Ok(HostMessage::Pong),
            MSG_RESCAN => Ok(HostMessage::Rescan),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
