//! HDLC framing layer: control-field construction, byte stuffing, frame
//! check sequence computation and frame encode/decode.
//!
//! The wire format, left to right, is
//!
//! ```text
//! 0x7E | stuffed(address) | stuffed(control) | stuffed(info)* |
//!       stuffed(fcs_hi) | stuffed(fcs_lo) | 0x7E
//! ```
//!
//! where the delimiting flag bytes are never stuffed. Encode and decode
//! operate on a single complete in-memory buffer; transport and reassembly
//! across reads are the caller's responsibility.

use arrayvec::ArrayVec;

pub mod control;
pub mod decoder;
pub mod encoder;
pub mod escape;
pub mod fcs;

pub use decoder::decode;
pub use encoder::{encode, encode_bytes, max_encoded_len};
pub use escape::{ESCAPE, FLAG};

/// Maximum number of information bytes a frame can carry.
pub const INFO_MAX_LEN: usize = 255;


/// A protocol data unit: address, control byte and bounded information field.
///
/// The control byte is stored raw; use the views in [`control`] to build or
/// interpret it as an I-, S- or U-frame layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub address: u8,
    pub control: u8,
    pub info: ArrayVec<u8, INFO_MAX_LEN>,
}

impl Frame {
    /// Creates a frame with an empty information field.
    pub fn new(address: u8, control: u8) -> Self {
        Self {
            address,
            control,
            info: ArrayVec::new(),
        }
    }
}
