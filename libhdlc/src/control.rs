//! Control-field bit layouts.
//!
//! One control byte, three overlapping interpretations: I-frame
//! (information transfer), S-frame (supervisory) and U-frame (unnumbered).
//! The byte itself does not record which layout was used to build it; the
//! caller picks the view. Bit 0 is the least-significant bit of the byte.
//!
//! ```text
//! layout | bit 0 | bits 1-3      | bit 4 | bits 5-7
//! I      | 1     | N(S)          | P/F   | N(R)
//! S      | 1, 0  | S code (2)    | P/F   | N(R)
//! U      | 1, 1  | M1 (2)        | P/F   | M2
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidCommand,
}

impl From<num_enum::TryFromPrimitiveError<UnnumberedCommand>> for Error {
    fn from(_: num_enum::TryFromPrimitiveError<UnnumberedCommand>) -> Self {
        Self::InvalidCommand
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommand => write!(f, "unknown unnumbered frame command"),
        }
    }
}

impl std::error::Error for Error {}


/// Supervisory frame function codes (2-bit S field).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum SupervisoryCode {
    /// RR, receive ready.
    ReceiveReady = 0x00,
    /// REJ, reject all frames starting at N(R).
    Reject = 0x01,
    /// RNR, receive not ready.
    ReceiveNotReady = 0x02,
    /// SREJ, selective reject of frame N(R).
    SelectiveReject = 0x03,
}

impl SupervisoryCode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x00 => Self::ReceiveReady,
            0x01 => Self::Reject,
            0x02 => Self::ReceiveNotReady,
            _ => Self::SelectiveReject,
        }
    }
}


/// Unnumbered frame commands, each mapping to a fixed (M1, M2) pair.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum UnnumberedCommand {
    /// Set normal response mode.
    Snrm = 0x00,
    /// Set asynchronous balanced mode.
    Sabm = 0x01,
    /// Set asynchronous balanced mode extended.
    Sabme = 0x02,
    /// Disconnect.
    Disc = 0x03,
    /// Unnumbered acknowledgement.
    Ua = 0x04,
    /// Reset send and receive sequence numbers.
    Rset = 0x05,
    /// Frame reject.
    Frmr = 0x06,
}

impl UnnumberedCommand {
    const fn modifiers(self) -> (u8, u8) {
        match self {
            Self::Snrm => (0b00, 0b001),
            Self::Sabm => (0b11, 0b100),
            Self::Sabme => (0b11, 0b110),
            Self::Disc => (0b00, 0b010),
            Self::Ua => (0b00, 0b110),
            Self::Rset => (0b11, 0b001),
            Self::Frmr => (0b10, 0b001),
        }
    }

    fn from_modifiers(m1: u8, m2: u8) -> Result<Self, Error> {
        match (m1, m2) {
            (0b00, 0b001) => Ok(Self::Snrm),
            (0b11, 0b100) => Ok(Self::Sabm),
            (0b11, 0b110) => Ok(Self::Sabme),
            (0b00, 0b010) => Ok(Self::Disc),
            (0b00, 0b110) => Ok(Self::Ua),
            (0b11, 0b001) => Ok(Self::Rset),
            (0b10, 0b001) => Ok(Self::Frmr),
            _ => Err(Error::InvalidCommand),
        }
    }
}


/// I-frame view of the control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Information {
    /// Send sequence number N(S), 3 bits.
    pub ns: u8,
    /// Poll/final bit.
    pub pf: u8,
    /// Receive sequence number N(R), 3 bits.
    pub nr: u8,
}

impl Information {
    pub fn new(ns: u8, pf: u8, nr: u8) -> Self {
        Self { ns, pf, nr }
    }

    /// Packs the view into a control byte. Fields are truncated to their bit
    /// widths; out-of-range values are not rejected.
    pub fn to_byte(self) -> u8 {
        0x01 | (self.ns & 0x07) << 1 | (self.pf & 0x01) << 4 | (self.nr & 0x07) << 5
    }

    pub fn from_byte(byte: u8) -> Self {
        Self {
            ns: (byte >> 1) & 0x07,
            pf: (byte >> 4) & 0x01,
            nr: (byte >> 5) & 0x07,
        }
    }
}


/// S-frame view of the control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supervisory {
    pub code: SupervisoryCode,
    /// Poll/final bit.
    pub pf: u8,
    /// Receive sequence number N(R), 3 bits.
    pub nr: u8,
}

impl Supervisory {
    pub fn new(code: SupervisoryCode, pf: u8, nr: u8) -> Self {
        Self { code, pf, nr }
    }

    /// Packs the view into a control byte. `pf` and `nr` are truncated to
    /// their bit widths.
    pub fn to_byte(self) -> u8 {
        0x01 | (self.code as u8 & 0x03) << 2 | (self.pf & 0x01) << 4 | (self.nr & 0x07) << 5
    }

    pub fn from_byte(byte: u8) -> Self {
        Self {
            code: SupervisoryCode::from_bits(byte >> 2),
            pf: (byte >> 4) & 0x01,
            nr: (byte >> 5) & 0x07,
        }
    }
}


/// U-frame view of the control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unnumbered {
    pub command: UnnumberedCommand,
    /// Poll/final bit.
    pub pf: u8,
}

impl Unnumbered {
    pub fn new(command: UnnumberedCommand, pf: u8) -> Self {
        Self { command, pf }
    }

    /// Builds the view from a raw command code, failing with
    /// [`Error::InvalidCommand`] if the code is not one of the seven
    /// enumerated commands.
    pub fn from_code(code: u8, pf: u8) -> Result<Self, Error> {
        Ok(Self {
            command: UnnumberedCommand::try_from(code)?,
            pf,
        })
    }

    /// Packs the view into a control byte via the (M1, M2) lookup table.
    pub fn to_byte(self) -> u8 {
        let (m1, m2) = self.command.modifiers();

        0x03 | m1 << 2 | (self.pf & 0x01) << 4 | m2 << 5
    }

    /// Interprets a control byte as a U-frame, failing with
    /// [`Error::InvalidCommand`] if the (M1, M2) pair does not name a known
    /// command.
    pub fn from_byte(byte: u8) -> Result<Self, Error> {
        Ok(Self {
            command: UnnumberedCommand::from_modifiers((byte >> 2) & 0x03, (byte >> 5) & 0x07)?,
            pf: (byte >> 4) & 0x01,
        })
    }
}
