//! # Channel Accessor
//!
//! Reads and writes a single color channel as a flat intensity sequence.
//!
//! Pixels are always visited column by column: the outer loop runs over `x`,
//! the inner loop over `y`. Images encoded by earlier releases depend on this
//! order, so it must not change.

use image::{GenericImageView, Pixel, Rgb, RgbImage};

use crate::processing::error::StegoError;
use crate::processing::parity::apply_bit_symbol;

/// One of the three RGB color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = StegoError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Channel::Red),
            1 => Ok(Channel::Green),
            2 => Ok(Channel::Blue),
            other => Err(StegoError::InvalidChannel(other)),
        }
    }
}

/// Copy `image` into a fresh 3-channel RGB buffer.
///
/// Grayscale pixels are spread over all three channels and alpha is dropped.
pub fn to_rgb<I, P>(image: &I) -> RgbImage
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    RgbImage::from_fn(width, height, |x, y| image.get_pixel(x, y).to_rgb())
}

/// Read one channel of every pixel in column-major order.
///
/// The returned sequence always has `width * height` entries.
pub fn extract_channel<I, P>(image: &I, channel: Channel) -> Vec<u8>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let index = channel.index();
    let mut intensities = Vec::with_capacity(width as usize * height as usize);

    for x in 0..width {
        for y in 0..height {
            let rgb: Rgb<u8> = image.get_pixel(x, y).to_rgb();
            intensities.push(rgb[index]);
        }
    }

    intensities
}

/// Hide `bits` in one channel of a copy of `image`.
///
/// The copy is normalized to RGB first. Each visited pixel takes the next bit
/// through the parity codec; once `bits` runs out the remaining pixels are
/// left as they were. Bits beyond the last pixel are dropped.
///
/// # Errors
/// Returns [`StegoError::InvalidBitSymbol`] if `bits` holds anything other
/// than `'0'` and `'1'`.
pub fn embed_bits<I, P>(image: &I, bits: &str, channel: Channel) -> Result<RgbImage, StegoError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let mut output = to_rgb(image);
    let (width, height) = output.dimensions();
    let index = channel.index();
    let mut symbols = bits.chars();

    'outer: for x in 0..width {
        for y in 0..height {
            let Some(symbol) = symbols.next() else {
                break 'outer;
            };

            let pixel = output.get_pixel_mut(x, y);
            pixel[index] = apply_bit_symbol(pixel[index], symbol)?;
        }
    }

    Ok(output)
}
