//! # Image Processing and Steganography
//!
//! This module hides text in the green channel of RGB images using the parity
//! of each intensity value (LSB steganography).
//!
//! ## Modules
//!
//! - [`parity`]: bit ⇄ even/odd intensity mapping
//! - [`channel`]: image ⇄ flat intensity sequence in column-major order
//! - [`binary`]: text ⇄ 8-bit codes
//! - [`header`]: the 3-digit length header
//! - [`steganography`]: encode/decode pipelines and file helpers
//! - [`error`]: codec error type

pub mod binary;
pub mod channel;
pub mod error;
pub mod header;
pub mod parity;
pub mod steganography;

// Re-export main functions for convenience
pub use error::StegoError;
pub use steganography::{
    capacity, decode_message, decode_message_bytes, decode_message_file, encode_message,
    encode_message_bytes, encode_message_file, encode_message_strict, Capacity,
};
