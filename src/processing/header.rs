//! # Length Header
//!
//! Every hidden message starts with its character count written as three
//! zero-padded decimal digits, so `"hi"` travels as `"002hi"`.

use crate::processing::binary::{from_bits, BITS_PER_CHAR};
use crate::processing::error::StegoError;

/// Width of the length header in characters.
pub const HEADER_CHARS: usize = 3;

/// Longest message the header can describe.
pub const MAX_MESSAGE_LEN: usize = 999;

/// Format the character count of `message` as a 3-digit header.
///
/// # Errors
/// Returns [`StegoError::MessageTooLong`] for messages over 999 characters.
pub fn format_header(message: &str) -> Result<String, StegoError> {
    let length = message.chars().count();
    if length > MAX_MESSAGE_LEN {
        return Err(StegoError::MessageTooLong {
            length,
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(format!("{:0width$}", length, width = HEADER_CHARS))
}

/// Prefix `message` with its length header.
pub fn prepend_header(message: &str) -> Result<String, StegoError> {
    let header = format_header(message)?;
    Ok(header + message)
}

/// Read the message length out of the first `header_chars * 8` intensities.
///
/// Anything that does not decode to a run of decimal digits, including a
/// sequence that is too short, yields 0, meaning "no message".
pub fn parse_header(intensities: &[u8], header_chars: usize) -> usize {
    let needed = header_chars * BITS_PER_CHAR;
    if intensities.len() < needed {
        return 0;
    }

    let Some(text) = from_bits(&intensities[..needed], header_chars) else {
        return 0;
    };

    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }

    text.parse().unwrap_or(0)
}
