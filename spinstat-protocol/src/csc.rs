//! CSC Measurement decoding
//!
//! Frame layout (little-endian, offsets from the start of the value):
//! - offset 0 (1 byte): flags, bit 0 = wheel data present, bit 1 = crank data present
//! - offset 1 (4 bytes): cumulative wheel revolutions
//! - offset 5 (2 bytes): last wheel event time (1/1024 s)
//! - offset 7 (2 bytes): cumulative crank revolutions
//! - offset 9 (2 bytes): last crank event time (1/1024 s)
//!
//! Fields are read positionally whatever the flags say; consumers use
//! [`Sample::has_wheel`] and [`Sample::has_crank`] to decide what to trust.

/// Flag bit: wheel revolution data present
pub const FLAG_WHEEL_DATA: u8 = 0x01;

/// Flag bit: crank revolution data present
pub const FLAG_CRANK_DATA: u8 = 0x02;

/// Minimum frame length
///
/// The last field (crank event time) ends at offset 11, so anything shorter
/// cannot be decoded without reading past the end of the buffer.
pub const MIN_FRAME_LEN: usize = 11;

const OFFSET_FLAGS: usize = 0;
const OFFSET_WHEEL_REVS: usize = 1;
const OFFSET_WHEEL_TIME: usize = 5;
const OFFSET_CRANK_REVS: usize = 7;
const OFFSET_CRANK_TIME: usize = 9;

/// Errors that can occur while decoding a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer shorter than [`MIN_FRAME_LEN`]
    TooShort {
        /// Length of the rejected buffer
        len: usize,
    },
    /// A fixed-offset field could not be read
    Malformed,
}

/// One decoded CSC measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Wheel revolution data present (flag bit 0)
    pub has_wheel: bool,
    /// Crank revolution data present (flag bit 1)
    pub has_crank: bool,
    /// Cumulative wheel revolutions, wraps at 2^32
    pub wheel_revolutions: u32,
    /// Last wheel event time in 1/1024 s ticks, wraps at 2^16
    pub wheel_event_time: u16,
    /// Cumulative crank revolutions, wraps at 2^16
    pub crank_revolutions: u16,
    /// Last crank event time in 1/1024 s ticks, wraps at 2^16
    pub crank_event_time: u16,
}

impl Sample {
    /// Rebuild the defined bits of the flags byte
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.has_wheel {
            flags |= FLAG_WHEEL_DATA;
        }
        if self.has_crank {
            flags |= FLAG_CRANK_DATA;
        }
        flags
    }

    /// Encode this sample in the measurement layout (the inverse of [`decode`])
    pub fn encode(&self) -> [u8; MIN_FRAME_LEN] {
        let mut buf = [0u8; MIN_FRAME_LEN];
        buf[OFFSET_FLAGS] = self.flags();
        buf[OFFSET_WHEEL_REVS..OFFSET_WHEEL_TIME]
            .copy_from_slice(&self.wheel_revolutions.to_le_bytes());
        buf[OFFSET_WHEEL_TIME..OFFSET_CRANK_REVS]
            .copy_from_slice(&self.wheel_event_time.to_le_bytes());
        buf[OFFSET_CRANK_REVS..OFFSET_CRANK_TIME]
            .copy_from_slice(&self.crank_revolutions.to_le_bytes());
        buf[OFFSET_CRANK_TIME..MIN_FRAME_LEN]
            .copy_from_slice(&self.crank_event_time.to_le_bytes());
        buf
    }
}

/// Decode a CSC measurement value
///
/// Bytes past [`MIN_FRAME_LEN`] are ignored.
pub fn decode(buffer: &[u8]) -> Result<Sample, DecodeError> {
    if buffer.len() < MIN_FRAME_LEN {
        return Err(DecodeError::TooShort { len: buffer.len() });
    }

    let flags = *buffer.get(OFFSET_FLAGS).ok_or(DecodeError::Malformed)?;

    Ok(Sample {
        has_wheel: flags & FLAG_WHEEL_DATA != 0,
        has_crank: flags & FLAG_CRANK_DATA != 0,
        wheel_revolutions: u32::from_le_bytes(read_array(buffer, OFFSET_WHEEL_REVS)?),
        wheel_event_time: u16::from_le_bytes(read_array(buffer, OFFSET_WHEEL_TIME)?),
        crank_revolutions: u16::from_le_bytes(read_array(buffer, OFFSET_CRANK_REVS)?),
        crank_event_time: u16::from_le_bytes(read_array(buffer, OFFSET_CRANK_TIME)?),
    })
}

fn read_array<const N: usize>(buffer: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    buffer
        .get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(DecodeError::Malformed)
}
