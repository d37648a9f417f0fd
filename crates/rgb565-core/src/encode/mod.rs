//! Pixel-format encoding for the RGB565 converter.
//!
//! This module provides functionality for:
//! - Packing 8-bit RGB pixels into 16-bit RGB565 values
//! - Encoding whole images into headerless little-endian raw buffers
//! - Splitting the encode across threads for large images
//!
//! # Examples
//!
//! ```ignore
//! use rgb565_core::decode::DecodedImage;
//! use rgb565_core::encode::encode_rgb565;
//!
//! let image = DecodedImage::filled(140, 40, [0, 0, 0]);
//! let raw = encode_rgb565(&image).unwrap();
//! assert_eq!(raw.len(), 140 * 40 * 2);
//! ```

mod rgb565;

pub use rgb565::{
    encode_rgb565, encode_rgb565_into, encode_rgb565_parallel, encoded_len, rgb565_to_rgb888,
    rgb888_to_rgb565, EncodeError, BYTES_PER_PIXEL,
};
