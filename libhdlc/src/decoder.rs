//! Frame deserialization: a state machine over a single complete buffer.
//!
//! States advance in order, none skippable:
//!
//! ```text
//! StartFlag -> Address -> Control -> Information -> Fcs -> StopFlag
//! ```
//!
//! The information state consumes unstuffed bytes while more than 3 raw
//! input bytes remain; the trailing 3 bytes are taken as the two FCS bytes
//! and the closing flag. This boundary assumes the FCS field itself needed
//! no escaping, matching the encoder's real-world output in all but the
//! rare frames whose FCS bytes collide with a reserved value; such frames
//! fail with [`Error::FcsMismatch`]. The FCS comparison runs over the raw
//! stuffed content region, mirroring the encoder.

use tracing::trace;

use crate::Frame;
use crate::escape::{self, FLAG, read_byte};
use crate::fcs;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An escape sequence was cut off by the end of input.
    BufferTooSmall,
    /// A flag byte was missing where one was required.
    FramingError,
    /// The received FCS does not match the computed one.
    FcsMismatch,
    /// Input was exhausted before the closing flag.
    IncompleteFrame,
    /// The information field exceeds [`INFO_MAX_LEN`](crate::INFO_MAX_LEN).
    InformationTooLong,
}

impl From<escape::Error> for Error {
    fn from(value: escape::Error) -> Self {
        match value {
            escape::Error::BufferTooSmall => Self::BufferTooSmall,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::BufferTooSmall => "escape sequence cut off by end of input",
            Self::FramingError => "missing or misplaced flag byte",
            Self::FcsMismatch => "frame check sequence mismatch",
            Self::IncompleteFrame => "no stop flag detected",
            Self::InformationTooLong => "information field exceeds maximum length",
        };

        write!(f, "{msg}")
    }
}

impl std::error::Error for Error {}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartFlag,
    Address,
    Control,
    Information,
    Fcs,
    StopFlag,
}


/// Decodes a single complete frame from `buf`.
///
/// Validates the leading flag, unstuffs the address, control and information
/// fields, verifies the FCS and checks for the closing flag. Any failure
/// invalidates the partially populated frame; no partial result is returned.
pub fn decode(buf: &[u8]) -> Result<Frame, Error> {
    let mut frame = Frame::default();
    let mut state = State::StartFlag;
    let mut pos = 0;

    while pos < buf.len() {
        match state {
            State::StartFlag => {
                if buf[pos] != FLAG {
                    trace!(byte = buf[pos], "missing start flag");
                    return Err(Error::FramingError);
                }

                pos += 1;
                state = State::Address;
            },
            State::Address => {
                let (byte, n) = read_byte(&buf[pos..])?;

                frame.address = byte;
                pos += n;
                state = State::Control;
            },
            State::Control => {
                let (byte, n) = read_byte(&buf[pos..])?;

                frame.control = byte;
                pos += n;
                state = State::Information;
            },
            State::Information => {
                // the trailing 3 raw bytes are the FCS field and the
                // closing flag
                if buf.len() - pos <= 3 {
                    state = State::Fcs;
                    continue;
                }

                let (byte, n) = read_byte(&buf[pos..])?;

                if frame.info.try_push(byte).is_err() {
                    trace!("information field exceeds maximum length");
                    return Err(Error::InformationTooLong);
                }

                pos += n;
            },
            State::Fcs => {
                let (hi, n) = read_byte(&buf[pos..])?;
                pos += n;

                let (lo, n) = read_byte(&buf[pos..])?;
                pos += n;

                let received = u16::from_be_bytes([hi, lo]);
                let computed = fcs::compute(&buf[1..buf.len() - 3]);

                if received != computed {
                    trace!(received, computed, "fcs mismatch");
                    return Err(Error::FcsMismatch);
                }

                state = State::StopFlag;
            },
            State::StopFlag => {
                if buf[pos] != FLAG {
                    trace!(byte = buf[pos], "missing stop flag");
                    return Err(Error::FramingError);
                }

                return Ok(frame);
            },
        }
    }

    trace!("input exhausted, no stop flag detected");
    Err(Error::IncompleteFrame)
}


#[cfg(test)]
mod test {
    use super::*;

    const VECTOR: [u8; 10] = [0x7E, 0x03, 0x51, 0x04, 0x05, 0x06, 0x07, 0xEE, 0xEA, 0x7E];

    #[test]
    fn test_decode() {
        let frame = decode(&VECTOR).expect("error decoding frame");

        assert_eq!(frame.address, 0x03);
        assert_eq!(frame.control, 0x51);
        assert_eq!(frame.info[..], [0x04, 0x05, 0x06, 0x07]);
    }

    #[test]
    fn test_decode_escaped() {
        let data = [
            0x7E, 0x7D, 0x5E, 0xCD, 0x7D, 0x5E, 0x7D, 0x5E, 0x7D, 0x5E,
            0x7D, 0x5E, 0x50, 0xFF, 0x7E,
        ];

        let frame = decode(&data).expect("error decoding frame");

        assert_eq!(frame.address, 0x7E);
        assert_eq!(frame.control, 0xCD);
        assert_eq!(frame.info[..], [0x7E, 0x7E, 0x7E, 0x7E]);
    }

    #[test]
    fn test_decode_empty_info() {
        let data = [0x7E, 0xAA, 0x51, 0x1E, 0xC4, 0x7E];

        let frame = decode(&data).expect("error decoding frame");

        assert_eq!(frame.address, 0xAA);
        assert_eq!(frame.control, 0x51);
        assert!(frame.info.is_empty());
    }

    #[test]
    fn test_decode_missing_start_flag() {
        let mut data = VECTOR;
        data[0] = 0x00;

        assert_eq!(decode(&data), Err(Error::FramingError));
    }

    #[test]
    fn test_decode_missing_stop_flag() {
        let mut data = VECTOR;
        data[9] = 0x00;

        assert_eq!(decode(&data), Err(Error::FramingError));
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode(&[]), Err(Error::IncompleteFrame));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(decode(&VECTOR[..1]), Err(Error::IncompleteFrame));
        assert_eq!(decode(&VECTOR[..3]), Err(Error::IncompleteFrame));
    }

    #[test]
    fn test_decode_cut_off_escape() {
        // escaped address with no continuation byte before the tail
        let data = [0x7E, 0x7D];

        assert_eq!(decode(&data), Err(Error::BufferTooSmall));
    }

    #[test]
    fn test_decode_fcs_mismatch() {
        let mut data = VECTOR;
        data[7] ^= 0x01;

        assert_eq!(decode(&data), Err(Error::FcsMismatch));
    }

    #[test]
    fn test_decode_info_too_long() {
        // 300 information bytes exceed the 255-byte capacity
        let mut data = vec![0x7E, 0x00, 0x00];
        data.extend(std::iter::repeat_n(0x00, 300));
        data.extend([0x00, 0x00, 0x7E]);

        assert_eq!(decode(&data), Err(Error::InformationTooLong));
    }
}
