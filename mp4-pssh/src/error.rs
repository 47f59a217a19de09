use thiserror::Error;

/// The Errors that may occur when reading boxes or decoding identifiers.
#[derive(Debug, Error)]
pub enum Error {
    /// A read asked for more bytes than are left in the buffer.
    #[error("cannot read {requested} bytes, only {remaining} bytes remaining")]
    EndOfBuffer { requested: usize, remaining: usize },

    /// Invalid hex string.
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Identifier has wrong length.
    #[error("identifier has wrong length: expected 16 bytes, got {0} bytes")]
    InvalidLength(usize),

    /// Invalid base64 string.
    #[error("invalid base64 string: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl Error {
    /// Returns true if the error was raised by reading past the end of a buffer.
    pub fn is_end_of_buffer(&self) -> bool {
        matches!(self, Self::EndOfBuffer { .. })
    }
}
