//! Image decoding for the RGB565 converter.
//!
//! Decoding is delegated to the `image` crate. This module only adapts its
//! output to a packed 8-bit RGB [`DecodedImage`], which is what the encoder
//! consumes through the [`RgbSource`](crate::source::RgbSource) seam.
//!
//! # Examples
//!
//! ```ignore
//! use rgb565_core::decode::decode_file;
//!
//! let image = decode_file("logo.bmp").unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_bytes, decode_file};
pub use types::{DecodeError, DecodedImage};
