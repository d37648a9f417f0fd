//! Fixed-shape RGB pixel access.
//!
//! The encoder never touches container-specific pixel types directly. Anything
//! that can report its dimensions and hand back exactly three 8-bit channels
//! for a coordinate implements [`RgbSource`].

use image::{ImageBuffer, RgbImage, RgbaImage};

use crate::decode::DecodedImage;
use crate::encode::EncodeError;

/// Random-access 8-bit RGB pixel source.
///
/// Implementations may assume `x < width()` and `y < height()`.
pub trait RgbSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Red, green and blue channels of the pixel at `(x, y)`.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];

    /// Check that every coordinate inside the dimensions is readable.
    ///
    /// The encoder calls this once before reading any pixel. Sources whose
    /// storage is tied to their dimensions can keep the default.
    fn validate(&self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl RgbSource for DecodedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    fn validate(&self) -> Result<(), EncodeError> {
        let expected = self.pixel_count() * 3;
        if self.pixels.len() != expected {
            return Err(EncodeError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

impl RgbSource for RgbImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

/// The alpha channel is ignored, not composited.
impl RgbSource for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _alpha] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl<T: RgbSource + ?Sized> RgbSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        (**self).rgb(x, y)
    }

    fn validate(&self) -> Result<(), EncodeError> {
        (**self).validate()
    }
}
