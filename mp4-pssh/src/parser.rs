/*
    REFERENCES
    ----------

    1. https://github.com/shaka-project/shaka-player/blob/7098f43f70119226bca2e5583833aaf27b498e33/lib/util/mp4_parser.js
    2. https://github.com/shaka-project/shaka-player/blob/4e933116984beb630d31ce7a0b8c9bc6f8b48c06/lib/util/pssh.js

*/

use crate::Reader;
use log::{debug, trace};
use std::{fmt, iter::FusedIterator};

/// size(4 bytes) + type(4 bytes) = 8 bytes
const HEADER_SIZE: usize = 8;

/// Four-character code identifying a box type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const PSSH: Self = Self(*b"pssh");

    /// Convert an ascii string name to a box type.
    /// Returns `None` unless the name is exactly four bytes long.
    pub fn from_string(name: &str) -> Option<Self> {
        Some(Self(name.as_bytes().try_into().ok()?))
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Top level box walker.
///
/// Yields one [`ParsedBox`] per complete box, strictly in buffer order. The
/// walk stops for good at the first box which cannot be read to its end;
/// boxes yielded before that are unaffected.
#[derive(Clone, Debug)]
pub struct Mp4Parser<'a> {
    data: &'a [u8],
    reader: Reader<'a>,
    done: bool,
}

impl<'a> Mp4Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            reader: Reader::new(data),
            done: false,
        }
    }

    /// Parse the next box on the current level.
    fn parse_next(&mut self) -> Option<ParsedBox<'a>> {
        let start = self.reader.get_position();

        if self.reader.remaining() < HEADER_SIZE {
            return None;
        }

        let size = self.reader.read_u32().ok()?;
        let name = FourCC(self.reader.read_array().ok()?);

        let payload_size = match size {
            // Box extends to the end of the buffer.
            0 => self.reader.remaining(),
            x if (x as usize) < HEADER_SIZE => {
                debug!("{} box at offset {} has invalid size {}", name, start, size);
                return None;
            }
            x => x as usize - HEADER_SIZE,
        };

        let Ok(payload) = self.reader.read_bytes(payload_size) else {
            debug!(
                "{} box at offset {} is truncated ({} bytes declared, {} available)",
                name,
                start,
                payload_size + HEADER_SIZE,
                self.reader.remaining() + HEADER_SIZE
            );
            return None;
        };

        let end = self.reader.get_position();
        trace!("parsed {} box at offset {} ({} bytes)", name, start, end - start);

        Some(ParsedBox {
            name,
            start,
            size: end - start,
            payload,
            data: &self.data[start..end],
        })
    }
}

impl<'a> Iterator for Mp4Parser<'a> {
    type Item = ParsedBox<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let box_ = self.parse_next();

        if box_.is_none() {
            self.done = true;
        }

        box_
    }
}

impl FusedIterator for Mp4Parser<'_> {}

/// Parsed mp4 box.
#[derive(Clone, Copy, Debug)]
pub struct ParsedBox<'a> {
    /// The box name, a 4-character code.
    pub name: FourCC,
    /// The start of this box (before the header) in the original buffer.
    pub start: usize,
    /// The size of this box (including the header). A box declared with size
    /// zero reports the number of bytes it actually spans.
    pub size: usize,
    /// Box body, without the header.
    pub payload: &'a [u8],
    data: &'a [u8],
}

impl<'a> ParsedBox<'a> {
    /// A reader positioned at the start of the box body. Reading or not reading
    /// to the end has no effect on sibling boxes.
    pub fn reader(&self) -> Reader<'a> {
        Reader::new(self.payload)
    }

    /// The whole box, header included.
    pub fn full_data(&self) -> &'a [u8] {
        self.data
    }
}
