//! Frame serialization: delimiters, byte stuffing and FCS emission.

use bytes::BytesMut;
use tracing::trace;

use crate::Frame;
use crate::escape::{self, Writer};
use crate::fcs;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The output buffer cannot hold the complete encoded frame.
    BufferTooSmall,
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
        match self {
            Self::BufferTooSmall => write!(f, "output buffer too small for encoded frame"),
        }
    }
}

impl std::error::Error for Error {}


/// Worst-case wire size for a frame carrying `info_len` information bytes,
/// assuming every content byte and both FCS bytes need escaping.
pub const fn max_encoded_len(info_len: usize) -> usize {
    2 * info_len + 10
}

/// Encodes `frame` into `buf`, returning the number of bytes written.
///
/// Emission order: leading flag, stuffed address, stuffed control, stuffed
/// information bytes, stuffed FCS (high byte first), trailing flag. The FCS
/// covers the stuffed content between the flags, excluding the FCS field
/// itself.
///
/// Fails with [`Error::BufferTooSmall`] if `buf` cannot hold the complete
/// frame. Failure is terminal for the call; whatever was partially written
/// must be discarded.
pub fn encode(frame: &Frame, buf: &mut [u8]) -> Result<usize, Error> {
    let capacity = buf.len();

    write_frame(frame, buf).inspect_err(|_| {
        trace!(
            capacity,
            needed = max_encoded_len(frame.info.len()),
            "output buffer too small"
        );
    })
}

fn write_frame(frame: &Frame, buf: &mut [u8]) -> Result<usize, Error> {
    let mut w = Writer::new(buf);

    w.put_flag()?;
    w.put(frame.address)?;
    w.put(frame.control)?;

    for &byte in &frame.info {
        w.put(byte)?;
    }

    // The checksum runs over the stuffed content after the leading flag, not
    // over the raw field values.
    let fcs = fcs::compute(&w.written()[1..]);

    w.put((fcs >> 8) as u8)?;
    w.put(fcs as u8)?;
    w.put_flag()?;

    Ok(w.position())
}

/// Encodes `frame` into a freshly allocated buffer sized for the worst case,
/// truncated to the actual wire length.
pub fn encode_bytes(frame: &Frame) -> BytesMut {
    let mut buf = BytesMut::zeroed(max_encoded_len(frame.info.len()));

    let len = encode(frame, &mut buf).expect("buffer sized for worst-case frame");
    buf.truncate(len);

    buf
}


#[cfg(test)]
mod test {
    use super::*;

    fn frame(address: u8, control: u8, info: &[u8]) -> Frame {
        let mut frame = Frame::new(address, control);
        frame.info.try_extend_from_slice(info).expect("info too long");
        frame
    }

    #[test]
    fn test_encode() {
        let frame = frame(0x03, 0x51, &[0x04, 0x05, 0x06, 0x07]);
        let mut buf = [0; 64];

        let len = encode(&frame, &mut buf).expect("error encoding frame");

        assert_eq!(len, 10);
        assert_eq!(
            buf[..len],
            [0x7E, 0x03, 0x51, 0x04, 0x05, 0x06, 0x07, 0xEE, 0xEA, 0x7E],
        );
    }

    #[test]
    fn test_encode_escaped() {
        let frame = frame(0x7E, 0xCD, &[0x7E, 0x7E, 0x7E, 0x7E]);
        let mut buf = [0; 64];

        let len = encode(&frame, &mut buf).expect("error encoding frame");

        assert_eq!(len, 15);
        assert_eq!(
            buf[..len],
            [
                0x7E, 0x7D, 0x5E, 0xCD, 0x7D, 0x5E, 0x7D, 0x5E, 0x7D, 0x5E,
                0x7D, 0x5E, 0x50, 0xFF, 0x7E,
            ],
        );
    }

    #[test]
    fn test_encode_empty_info() {
        let frame = frame(0xAA, 0x51, &[]);
        let mut buf = [0; 16];

        let len = encode(&frame, &mut buf).expect("error encoding frame");

        assert_eq!(len, 6);
        assert_eq!(buf[..len], [0x7E, 0xAA, 0x51, 0x1E, 0xC4, 0x7E]);
    }

    #[test]
    fn test_encode_capacity_boundary() {
        let frame = frame(0x03, 0x51, &[0x04]);
        let mut buf = [0; 16];

        // required wire size is 7 bytes
        for capacity in 0..7 {
            assert_eq!(
                encode(&frame, &mut buf[..capacity]),
                Err(Error::BufferTooSmall),
            );
        }

        assert_eq!(encode(&frame, &mut buf[..7]), Ok(7));
        assert_eq!(encode(&frame, &mut buf[..8]), Ok(7));
    }

    #[test]
    fn test_encode_capacity_boundary_escaped() {
        let frame = frame(0x7E, 0xCD, &[0x7E]);
        let mut buf = [0; 16];

        // required wire size is 9 bytes
        for capacity in 0..9 {
            assert_eq!(
                encode(&frame, &mut buf[..capacity]),
                Err(Error::BufferTooSmall),
            );
        }

        assert_eq!(encode(&frame, &mut buf[..9]), Ok(9));
    }

    #[test]
    fn test_encode_bytes() {
        let frame = frame(0x03, 0x51, &[0x04, 0x05, 0x06, 0x07]);

        assert_eq!(
            &encode_bytes(&frame)[..],
            [0x7E, 0x03, 0x51, 0x04, 0x05, 0x06, 0x07, 0xEE, 0xEA, 0x7E],
        );
    }

    #[test]
    fn test_max_encoded_len() {
        assert_eq!(max_encoded_len(0), 10);

        // worst case is reachable: every byte of the frame escapes
        let frame = frame(0x7E, 0x7D, &[0x7E, 0x7D]);
        let mut buf = [0; 32];

        let len = encode(&frame, &mut buf).expect("error encoding frame");
        assert!(len <= max_encoded_len(2));
    }
}
