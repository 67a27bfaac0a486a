//! # Green Channel LSB Steganography
//!
//! Hides text in the parity of the green channel and recovers it again.
//!
//! ## Wire Format
//!
//! Pixels are visited column by column (outer `x`, inner `y`). Each visited
//! pixel carries one bit in the parity of its green value:
//!
//! ```text
//! [ 3-char decimal length, 24 bits ][ message, 8 bits per character ]
//! ```
//!
//! There is no version, checksum or encryption. Re-encoding the image with a
//! lossy format destroys the message.
//!
//! ## Encoding
//! 1. Prefix the message with its zero-padded length (`"hi"` → `"002hi"`)
//! 2. Serialize every character into 8 bits, MSB first
//! 3. Write the bits into a copy of the image, one pixel per bit
//!
//! ## Decoding
//! 1. Read the green channel in the same order
//! 2. Decode the first 24 values as the length header
//! 3. Decode the next `length * 8` values as the message
//!
//! Decoding never fails on a readable image: anything that does not look like
//! a message decodes to an empty string.
//!
//! ## Capacity
//! An image holds one bit per pixel, so a `w x h` image fits
//! `w * h / 8 - 3` characters, capped at 999 by the header.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{GenericImageView, ImageFormat, Pixel, RgbImage};
use log::{debug, info, warn};

use crate::processing::binary::{from_bits, to_bits, BITS_PER_CHAR};
use crate::processing::channel::{embed_bits, extract_channel, Channel};
use crate::processing::error::StegoError;
use crate::processing::header::{parse_header, prepend_header, HEADER_CHARS, MAX_MESSAGE_LEN};

/// Channel that carries the hidden message.
pub const CARRIER_CHANNEL: Channel = Channel::Green;

/// Number of intensities taken by the length header.
pub const HEADER_BITS: usize = HEADER_CHARS * BITS_PER_CHAR;

/// How much an image can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// One bit per pixel.
    pub available_bits: usize,
    /// Longest message that fits, header included and capped at 999.
    pub max_message_chars: usize,
}

/// Work out how much text `image` can carry.
pub fn capacity<I: GenericImageView>(image: &I) -> Capacity {
    let (width, height) = image.dimensions();
    let available_bits = width as usize * height as usize;
    let max_message_chars = (available_bits / BITS_PER_CHAR)
        .saturating_sub(HEADER_CHARS)
        .min(MAX_MESSAGE_LEN);

    Capacity {
        available_bits,
        max_message_chars,
    }
}

/// Number of pixels needed to hide `message`, header included.
pub fn required_bits(message: &str) -> usize {
    (HEADER_CHARS + message.chars().count()) * BITS_PER_CHAR
}

/// Hide `message` in a copy of `image`.
///
/// If the image is too small the message is cut off where the pixels run out
/// and a warning is logged. Such an image decodes to an empty string. Use
/// [`encode_message_strict`] to get an error instead.
///
/// # Errors
/// - [`StegoError::MessageTooLong`] for messages over 999 characters
/// - [`StegoError::UnsupportedCharacter`] for characters above U+00FF
pub fn encode_message<I, P>(image: &I, message: &str) -> Result<RgbImage, StegoError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let full = prepend_header(message)?;
    let bits = to_bits(&full)?;

    let available = capacity(image).available_bits;
    if bits.len() > available {
        warn!(
            "Image holds {} bits but the message needs {}; the message will be truncated",
            available,
            bits.len()
        );
    }

    debug!(
        "Embedding {} characters ({} bits) into the {:?} channel",
        message.chars().count(),
        bits.len(),
        CARRIER_CHANNEL
    );
    embed_bits(image, &bits, CARRIER_CHANNEL)
}

/// Like [`encode_message`], but refuses images that are too small.
///
/// # Errors
/// Everything [`encode_message`] returns, plus
/// [`StegoError::InsufficientCapacity`] before any pixel is touched.
pub fn encode_message_strict<I, P>(image: &I, message: &str) -> Result<RgbImage, StegoError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    // Length and character checks come first so the caller sees the real cause.
    let full = prepend_header(message)?;
    to_bits(&full)?;

    let required_bits = required_bits(message);
    let available_bits = capacity(image).available_bits;
    if required_bits > available_bits {
        return Err(StegoError::InsufficientCapacity {
            required_bits,
            available_bits,
        });
    }

    encode_message(image, message)
}

/// Recover a message hidden by [`encode_message`].
///
/// Returns an empty string when the image carries no valid message.
pub fn decode_message<I, P>(image: &I) -> String
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let intensities = extract_channel(image, CARRIER_CHANNEL);
    decode_intensities(&intensities)
}

/// Steps of the two-phase read: a fixed-width header, then the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DecodeState {
    ReadHeader,
    ReadPayload { length: usize },
    Done(String),
}

/// Decode a message from carrier intensities already in traversal order.
pub fn decode_intensities(intensities: &[u8]) -> String {
    let mut state = DecodeState::ReadHeader;

    loop {
        state = match state {
            DecodeState::ReadHeader => {
                let header_end = HEADER_BITS.min(intensities.len());
                match parse_header(&intensities[..header_end], HEADER_CHARS) {
                    0 => {
                        debug!("No length header found");
                        DecodeState::Done(String::new())
                    }
                    length => DecodeState::ReadPayload { length },
                }
            }
            DecodeState::ReadPayload { length } => {
                let end = (HEADER_BITS + length * BITS_PER_CHAR).min(intensities.len());
                let payload = &intensities[HEADER_BITS..end];
                let message = from_bits(payload, length).unwrap_or_else(|| {
                    debug!(
                        "Header announced {} characters but only {} bits follow",
                        length,
                        payload.len()
                    );
                    String::new()
                });
                DecodeState::Done(message)
            }
            DecodeState::Done(message) => return message,
        }
    }
}

/// Formats that keep every pixel value exactly as written.
fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Tga
            | ImageFormat::Pnm
            | ImageFormat::Farbfeld
    )
}

/// Embed `message` into an encoded image and return it as PNG bytes.
///
/// The input can be any format the `image` crate reads. Capacity is checked
/// strictly.
///
/// # Example
/// ```ignore
/// let cover = std::fs::read("cleat.png")?;
/// let carrier = encode_message_bytes(&cover, "meet at the pitch")?;
/// std::fs::write("cleat_secret.png", carrier)?;
/// ```
pub fn encode_message_bytes(image_bytes: &[u8], message: &str) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_bytes).context("Failed to read cover image")?;
    let encoded = encode_message_strict(&img, message)?;

    let mut output_bytes = Vec::new();
    encoded
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .context("Failed to write PNG")?;

    Ok(output_bytes)
}

/// Recover a message from encoded image bytes.
pub fn decode_message_bytes(image_bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(image_bytes).context("Failed to read image")?;
    Ok(decode_message(&img))
}

/// Embed `message` into the image at `input` and save it to `output`.
///
/// The output format follows the extension of `output` and must be lossless.
/// With `strict` set, a cover image that is too small is an error; otherwise
/// the message is truncated.
pub fn encode_message_file(
    input: impl AsRef<Path>,
    message: &str,
    output: impl AsRef<Path>,
    strict: bool,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let format = ImageFormat::from_path(output)
        .with_context(|| format!("Unknown output format for {}", output.display()))?;
    if !is_lossless(format) {
        return Err(StegoError::LossyOutputFormat(format!("{:?}", format)).into());
    }

    let img = image::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let encoded = if strict {
        encode_message_strict(&img, message)?
    } else {
        encode_message(&img, message)?
    };

    encoded
        .save_with_format(output, format)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    info!(
        "Hid {} characters from {} in {}",
        message.chars().count(),
        input.display(),
        output.display()
    );
    Ok(())
}

/// Recover a message from the image at `input`.
pub fn decode_message_file(input: impl AsRef<Path>) -> Result<String> {
    let input = input.as_ref();
    let img = image::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    Ok(decode_message(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    fn cleat(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, ((x + y) * 13 % 256) as u8, (y * 3 % 256) as u8])
        })
    }

    #[test]
    fn test_round_trip() {
        let img = cleat(16, 16);
        let encoded = encode_message(&img, "Goal!").unwrap();
        assert_eq!(decode_message(&encoded), "Goal!");
    }

    #[test]
    fn test_round_trip_empty_message() {
        let img = cleat(8, 8);
        let encoded = encode_message(&img, "").unwrap();
        assert_eq!(decode_message(&encoded), "");
    }

    #[test]
    fn test_round_trip_max_length() {
        let message: String = (0..999).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let img = cleat(90, 90);
        let encoded = encode_message_strict(&img, &message).unwrap();
        assert_eq!(decode_message(&encoded), message);
    }

    #[test]
    fn test_plain_image_decodes_empty() {
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        assert_eq!(decode_message(&img), "");
    }

    #[test]
    fn test_tiny_image_decodes_empty() {
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 1, 1]));
        assert_eq!(decode_message(&img), "");
    }

    #[test]
    fn test_too_long() {
        let img = cleat(100, 100);
        let err = encode_message(&img, &"x".repeat(1000)).unwrap_err();
        assert!(matches!(err, StegoError::MessageTooLong { length: 1000, .. }));
    }

    #[test]
    fn test_capacity_shortfall_truncates() {
        // 5x5 = 25 bits, "002hi" needs 40
        let img = cleat(5, 5);
        let encoded = encode_message(&img, "hi").unwrap();
        assert_eq!(encoded.dimensions(), (5, 5));
        assert_eq!(decode_message(&encoded), "");
    }

    #[test]
    fn test_capacity_shortfall_after_header() {
        // header fits but the payload is cut short
        let img = cleat(4, 8);
        let encoded = encode_message(&img, "hello").unwrap();
        assert_eq!(decode_message(&encoded), "");
    }

    #[test]
    fn test_strict_reports_capacity() {
        let img = cleat(5, 5);
        assert_eq!(
            encode_message_strict(&img, "hi"),
            Err(StegoError::InsufficientCapacity {
                required_bits: 40,
                available_bits: 25
            })
        );
    }

    #[test]
    fn test_capacity() {
        let cap = capacity(&cleat(10, 10));
        assert_eq!(cap.available_bits, 100);
        assert_eq!(cap.max_message_chars, 9);

        assert_eq!(capacity(&cleat(2, 2)).max_message_chars, 0);
        assert_eq!(capacity(&cleat(200, 200)).max_message_chars, 999);
        assert_eq!(required_bits("hi"), 40);
    }

    #[test]
    fn test_non_rgb_inputs() {
        let gray = GrayImage::from_fn(12, 12, |x, y| Luma([(x * 20 + y) as u8]));
        let encoded = encode_message(&gray, "luma").unwrap();
        assert_eq!(decode_message(&encoded), "luma");

        let rgba = RgbaImage::from_pixel(12, 12, Rgba([10, 20, 30, 128]));
        let encoded = encode_message(&rgba, "alpha").unwrap();
        assert_eq!(decode_message(&encoded), "alpha");
    }

    #[test]
    fn test_decode_intensities() {
        // "001" header then "A" (0x41)
        let bits = to_bits("001A").unwrap();
        let intensities: Vec<u8> = bits.chars().map(|c| if c == '1' { 1 } else { 0 }).collect();
        assert_eq!(decode_intensities(&intensities), "A");
        assert_eq!(decode_intensities(&[]), "");
        assert_eq!(decode_intensities(&[254, 254, 255, 255, 254, 254, 254, 254]), "");
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut cover = Vec::new();
        cleat(20, 20)
            .write_to(&mut Cursor::new(&mut cover), ImageFormat::Png)
            .unwrap();

        let carrier = encode_message_bytes(&cover, "top bins").unwrap();
        assert_eq!(decode_message_bytes(&carrier).unwrap(), "top bins");
    }

    #[test]
    fn test_bytes_reject_garbage() {
        assert!(decode_message_bytes(b"not an image").is_err());
    }
}
