//! Frame check sequence: CRC-16/ISO-HDLC.
//!
//! Polynomial 0x1021, initial value 0xFFFF, input and output reflected,
//! final XOR 0xFFFF. Reflection is implemented by reversing the bit order of
//! each input byte and of the final accumulator, which is equivalent to
//! driving the CRC with a reflected polynomial.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;
const XOR_OUT: u16 = 0xFFFF;


/// Incremental FCS accumulator.
#[derive(Debug, Clone)]
pub struct Fcs {
    state: u16,
}

impl Fcs {
    pub fn new() -> Self {
        Self { state: INIT }
    }

    pub fn put_u8(&mut self, byte: u8) {
        self.state ^= (byte.reverse_bits() as u16) << 8;

        for _ in 0..8 {
            if self.state & 0x8000 != 0 {
                self.state = (self.state << 1) ^ POLY;
            } else {
                self.state <<= 1;
            }
        }
    }

    pub fn put_slice(&mut self, data: &[u8]) {
        for &byte in data {
            self.put_u8(byte);
        }
    }

    /// Final FCS value. Transmitted high byte first.
    pub fn value(&self) -> u16 {
        self.state.reverse_bits() ^ XOR_OUT
    }
}

impl Default for Fcs {
    fn default() -> Self {
        Self::new()
    }
}


/// Computes the FCS over a complete byte slice.
pub fn compute(data: &[u8]) -> u16 {
    let mut fcs = Fcs::new();
    fcs.put_slice(data);
    fcs.value()
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_check_value() {
        // standard CRC-16/ISO-HDLC (X-25) check value
        assert_eq!(compute(b"123456789"), 0x906E);
    }

    #[test]
    fn test_empty() {
        assert_eq!(compute(&[]), 0x0000);
    }

    #[test]
    fn test_frame_content() {
        // address + control + information of the reference frame
        assert_eq!(compute(&[0x03, 0x51, 0x04, 0x05, 0x06, 0x07]), 0xEEEA);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let data = [0x03, 0x51, 0x04, 0x05, 0x06, 0x07];

        let mut fcs = Fcs::new();
        for &byte in &data {
            fcs.put_u8(byte);
        }

        assert_eq!(fcs.value(), compute(&data));
    }
}
