//! Byte stuffing: reserved byte values and the escape transparency layer.

/// Frame delimiter, marks the start and end of a frame. Never stuffed.
pub const FLAG: u8 = 0x7E;

/// Escape marker, indicates that the following byte has been XOR-masked.
pub const ESCAPE: u8 = 0x7D;

/// Mask applied to the byte following an escape marker.
pub const MASK: u8 = 0x20;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BufferTooSmall,
}


/// Cursor emitting stuffed output into a caller-provided buffer.
pub(crate) struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Emits a frame delimiter, unstuffed.
    pub fn put_flag(&mut self) -> Result<(), Error> {
        if self.pos >= self.buf.len() {
            return Err(Error::BufferTooSmall);
        }

        self.buf[self.pos] = FLAG;
        self.pos += 1;

        Ok(())
    }

    /// Emits one content byte, stuffing it if it collides with a reserved
    /// value. Writes one or two output bytes.
    pub fn put(&mut self, byte: u8) -> Result<(), Error> {
        match byte {
            FLAG | ESCAPE => {
                if self.buf.len() - self.pos < 2 {
                    return Err(Error::BufferTooSmall);
                }

                self.buf[self.pos] = ESCAPE;
                self.buf[self.pos + 1] = byte ^ MASK;
                self.pos += 2;
            },
            _ => {
                if self.pos >= self.buf.len() {
                    return Err(Error::BufferTooSmall);
                }

                self.buf[self.pos] = byte;
                self.pos += 1;
            },
        }

        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}


/// Reads one unstuffed content byte from the front of `buf`.
///
/// Returns the decoded byte and the number of raw bytes consumed (1, or 2
/// for an escape sequence). A plain byte that happens to equal a reserved
/// value is not rejected here; correctly encoded input never contains one.
pub(crate) fn read_byte(buf: &[u8]) -> Result<(u8, usize), Error> {
    match buf.first() {
        Some(&ESCAPE) => match buf.get(1) {
            Some(&byte) => Ok((byte ^ MASK, 2)),
            None => Err(Error::BufferTooSmall),
        },
        Some(&byte) => Ok((byte, 1)),
        None => Err(Error::BufferTooSmall),
    }
}
