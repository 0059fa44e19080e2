//! Byte framing for the bridge UART link
//!
//! ```text
//! 0xAA | LEN | TYPE | PAYLOAD (LEN bytes, LEN <= 64) | XOR(LEN, TYPE, PAYLOAD)
//! ```

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
///
/// A BLE notification with the default ATT MTU carries at most 20 bytes;
/// the extra room covers bridges that negotiate a larger MTU.
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// START, LENGTH, TYPE and CHECKSUM
const OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + OVERHEAD;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload longer than [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Bad length byte, or a message type/payload this side does not understand
    InvalidFrame,
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,
}

/// One message on the wire, without its framing bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(msg_type: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ msg_type, |acc, &byte| acc ^ byte)
}

impl Frame {
    /// Build a frame, rejecting payloads that do not fit
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + OVERHEAD
    }

    /// Write the framed message into `buffer`, returning the bytes used
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);

        let (body, trailer) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        trailer[0] = checksum(self.msg_type, &self.payload);

        Ok(len)
    }

    /// Encode into an owned buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Where the parser is within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for [`FRAME_START`]
    Sync,
    Length,
    Type { len: u8 },
    Payload { msg_type: u8, len: u8 },
    Checksum { msg_type: u8 },
}

/// Incremental frame reader
///
/// Bytes arrive one at a time from the UART. Anything before a START byte is
/// skipped, and any error drops the partial frame so the next START byte
/// begins a fresh one.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser waiting for a START byte
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// `Ok(Some(frame))` once a frame is complete and its checksum matches,
    /// `Ok(None)` while more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.state = match self.state {
            ParseState::Sync if byte == FRAME_START => ParseState::Length,
            ParseState::Sync => ParseState::Sync,
            ParseState::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::InvalidFrame);
            }
            ParseState::Length => ParseState::Type { len: byte },
            ParseState::Type { len: 0 } => ParseState::Checksum { msg_type: byte },
            ParseState::Type { len } => {
                self.payload.clear();
                ParseState::Payload {
                    msg_type: byte,
                    len,
                }
            }
            ParseState::Payload { msg_type, len } => {
                // Capacity was checked in the Length state
                let _ = self.payload.push(byte);
                if self.payload.len() < len as usize {
                    ParseState::Payload { msg_type, len }
                } else {
                    ParseState::Checksum { msg_type }
                }
            }
            ParseState::Checksum { msg_type } => {
                let valid = byte == checksum(msg_type, &self.payload);
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                return if valid {
                    Ok(Some(Frame { msg_type, payload }))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        };
        Ok(None)
    }

    /// Feed bytes until a frame completes
    ///
    /// Bytes after the completed frame are left unread.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A CSC measurement as the bridge forwards it
    const MEASUREMENT: [u8; 11] = [0x03, 0x10, 0x27, 0, 0, 0x00, 0x04, 0x2A, 0, 0x00, 0x02];

    #[test]
    fn test_heartbeat_bytes() {
        let mut buffer = [0u8; 8];
        let len = Frame::empty(0x03).encode(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], &[FRAME_START, 0, 0x03, 0x03]);
    }

    #[test]
    fn test_checksum_covers_length_type_payload() {
        let frame = Frame::new(0x02, &[0x03, 0x05, 0x00]).unwrap();
        let bytes = frame.encode_to_vec().unwrap();

        assert_eq!(bytes.len(), frame.encoded_len());
        assert_eq!(&bytes[..3], &[FRAME_START, 3, 0x02]);
        assert_eq!(bytes[6], 3 ^ 0x02 ^ 0x03 ^ 0x05);
    }

    #[test]
    fn test_encode_needs_room_for_checksum() {
        let frame = Frame::new(0x01, &MEASUREMENT).unwrap();
        let mut buffer = [0u8; 14];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
        assert_eq!(frame.encode(&mut [0u8; 15]), Ok(15));
    }

    #[test]
    fn test_measurement_through_parser() {
        let frame = Frame::new(0x01, &MEASUREMENT).unwrap();
        let bytes = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        for &byte in &bytes[..bytes.len() - 1] {
            assert_eq!(parser.feed(byte), Ok(None));
        }
        assert_eq!(parser.feed(bytes[bytes.len() - 1]), Ok(Some(frame)));
    }

    #[test]
    fn test_corrupted_byte_fails_checksum() {
        let mut bytes = Frame::new(0x01, &MEASUREMENT)
            .unwrap()
            .encode_to_vec()
            .unwrap();
        bytes[5] ^= 0x40;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&bytes), Err(FrameError::InvalidChecksum));
    }

    #[test]
    fn test_line_noise_before_frame() {
        let mut stream = Vec::<u8, 32>::new();
        stream.extend_from_slice(&[0x00, 0x55, 0xFF, 0x13]).unwrap();
        stream
            .extend_from_slice(&Frame::empty(0x03).encode_to_vec().unwrap())
            .unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&stream).unwrap().unwrap();
        assert_eq!(frame.msg_type, 0x03);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_oversized_length_resyncs() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::InvalidFrame)
        );

        let bytes = Frame::empty(0x03).encode_to_vec().unwrap();
        assert!(parser.feed_bytes(&bytes).unwrap().is_some());
    }

    #[test]
    fn test_consecutive_frames() {
        let status = Frame::new(0x02, &[0x01]).unwrap().encode_to_vec().unwrap();
        let measurement = Frame::new(0x01, &MEASUREMENT)
            .unwrap()
            .encode_to_vec()
            .unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&status).unwrap().unwrap().payload, [0x01]);
        assert_eq!(
            parser.feed_bytes(&measurement).unwrap().unwrap().payload,
            MEASUREMENT
        );
    }

    #[test]
    fn test_payload_limit() {
        assert!(Frame::new(0x01, &[0u8; MAX_PAYLOAD_SIZE]).is_ok());
        assert_eq!(
            Frame::new(0x01, &[0u8; MAX_PAYLOAD_SIZE + 1]),
            Err(FrameError::PayloadTooLarge)
        );
    }
}
