/*
    REFERENCES
    ----------

    1. https://github.com/shaka-project/shaka-player/blob/f539147d480fff9cc8d685f3aac0e6f5dc28a182/lib/util/data_view_reader.js

*/

use crate::{Error, Result};

/// Big endian reader over a borrowed byte buffer.
///
/// Every read is checked against the number of bytes remaining. A read which
/// cannot be satisfied returns [`Error::EndOfBuffer`] and leaves the position
/// where it was.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    pub fn get_length(&self) -> usize {
        self.data.len()
    }

    pub fn get_position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn skip(&mut self, bytes: usize) -> Result<()> {
        self.read_bytes(bytes).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read the next `bytes` bytes as a slice of the underlying buffer.
    pub fn read_bytes(&mut self, bytes: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();

        if bytes > remaining {
            return Err(Error::EndOfBuffer {
                requested: bytes,
                remaining,
            });
        }

        let start = self.position;
        self.position += bytes;
        Ok(&self.data[start..self.position])
    }

    /// Read the next `N` bytes into a fixed size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    /// Everything from the current position to the end of the buffer.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let rest = &self.data[self.position..];
        self.position = self.data.len();
        rest
    }
}
