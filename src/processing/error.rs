//! # Codec Errors
//!
//! Only the hard contracts of the codec raise errors. Decoding is tolerant and
//! reports "nothing found" through empty strings and `None` instead.

use thiserror::Error;

/// Errors raised by the steganography codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegoError {
    /// A bit string contained something other than `'0'` or `'1'`.
    #[error("invalid bit symbol {0:?} (expected '0' or '1')")]
    InvalidBitSymbol(char),

    /// The message does not fit the 3-digit length header.
    #[error("message is {length} characters long, the header allows at most {max}")]
    MessageTooLong { length: usize, max: usize },

    /// The character has no single-byte code.
    #[error("character {0:?} cannot be stored in one byte")]
    UnsupportedCharacter(char),

    /// The cover image has fewer pixels than the payload has bits.
    #[error("image too small: need {required_bits} bits but only {available_bits} are available")]
    InsufficientCapacity {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("invalid channel index {0} (expected 0, 1 or 2)")]
    InvalidChannel(usize),

    /// Lossy formats rewrite pixel values and destroy the payload.
    #[error("output format {0:?} is lossy and would destroy the hidden message")]
    LossyOutputFormat(String),
}
