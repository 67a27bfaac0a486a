//! # Binary Serializer / Deserializer
//!
//! Text travels one byte per character, most significant bit first. Only
//! characters with a code point below 256 can be stored.

use crate::processing::error::StegoError;
use crate::processing::parity::bit_of;

/// Number of intensities that carry one character.
pub const BITS_PER_CHAR: usize = 8;

/// Turn `text` into a string of `'0'`/`'1'` symbols, 8 per character.
///
/// # Errors
/// Returns [`StegoError::UnsupportedCharacter`] for characters above U+00FF.
pub fn to_bits(text: &str) -> Result<String, StegoError> {
    let mut bits = String::with_capacity(text.len() * BITS_PER_CHAR);
    for ch in text.chars() {
        let code = u8::try_from(u32::from(ch)).map_err(|_| StegoError::UnsupportedCharacter(ch))?;
        bits.push_str(&format!("{:08b}", code));
    }
    Ok(bits)
}

/// Decode exactly 8 intensities into one character.
///
/// A chunk of any other length yields an empty string.
pub fn decode_char(chunk: &[u8]) -> String {
    if chunk.len() != BITS_PER_CHAR {
        return String::new();
    }

    let code = chunk
        .iter()
        .fold(0u8, |acc, &intensity| (acc << 1) | bit_of(intensity).as_u8());
    char::from(code).to_string()
}

/// Decode `char_count` characters from their carrier intensities.
///
/// Returns `None` unless exactly `char_count * 8` intensities are given.
pub fn from_bits(intensities: &[u8], char_count: usize) -> Option<String> {
    if intensities.len() != char_count * BITS_PER_CHAR {
        return None;
    }

    Some(intensities.chunks(BITS_PER_CHAR).map(decode_char).collect())
}
