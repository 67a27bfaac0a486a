//! # Parity Bit Codec
//!
//! Maps a single bit onto the parity of a color intensity: odd values carry a
//! `1`, even values carry a `0`.

use std::fmt;

use crate::processing::error::StegoError;

/// A single hidden bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = StegoError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(StegoError::InvalidBitSymbol(other)),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Read the bit carried by an intensity value.
pub fn bit_of(intensity: u8) -> Bit {
    if intensity % 2 != 0 {
        Bit::One
    } else {
        Bit::Zero
    }
}

/// Nudge `intensity` by at most one step so its parity carries `bit`.
///
/// Only even values are raised and only odd values are lowered, so the result
/// never leaves `0..=255`.
pub fn apply_bit(intensity: u8, bit: Bit) -> u8 {
    match (bit, bit_of(intensity)) {
        (Bit::One, Bit::Zero) => intensity + 1,
        (Bit::Zero, Bit::One) => intensity - 1,
        _ => intensity,
    }
}

/// Like [`apply_bit`], but takes the bit as a `'0'`/`'1'` symbol from a bit string.
///
/// # Errors
/// Returns [`StegoError::InvalidBitSymbol`] for any other symbol.
pub fn apply_bit_symbol(intensity: u8, symbol: char) -> Result<u8, StegoError> {
    let bit = Bit::try_from(symbol)?;
    Ok(apply_bit(intensity, bit))
}
