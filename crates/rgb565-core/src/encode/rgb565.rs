//! RGB565 encoding for raw display buffers.
//!
//! Each pixel is reduced to 16 bits by truncating the low-order bits of
//! every channel (5 bits red, 6 bits green, 5 bits blue) and stored
//! little-endian. Pixels are laid out row-major with no header or padding,
//! so pixel `(x, y)` lives at byte offset `(x + y * width) * 2`.

use thiserror::Error;

use crate::source::RgbSource;

/// Number of bytes occupied by one encoded pixel.
pub const BYTES_PER_PIXEL: usize = 2;

/// Errors that can occur during RGB565 encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A pixel would be written past the end of the destination buffer.
    ///
    /// Only reachable when a destination buffer does not match the image
    /// dimensions.
    #[error("Pixel offset {offset} out of range for {len}-byte buffer")]
    OutOfRange { offset: usize, len: usize },

    /// Source pixel data length doesn't match its dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Size in bytes of the encoded buffer for the given dimensions.
#[inline]
pub fn encoded_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

/// Pack an 8-bit RGB triple into RGB565.
///
/// Low-order bits are discarded, never rounded: red and blue keep their top
/// 5 bits, green keeps its top 6 bits.
#[inline]
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Expand an RGB565 value back to 8-bit channels.
///
/// The high bits are replicated into the low bits so that full-scale values
/// map back to 255. Used for previewing encoded data, not by the file format.
#[inline]
pub fn rgb565_to_rgb888(value: u16) -> [u8; 3] {
    let r5 = ((value >> 11) & 0x1F) as u8;
    let g6 = ((value >> 5) & 0x3F) as u8;
    let b5 = (value & 0x1F) as u8;
    [
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    ]
}

/// Encode an image into a new RGB565 buffer.
///
/// # Returns
///
/// A buffer of exactly `width * height * 2` bytes. Images with a zero
/// dimension produce an empty buffer.
///
/// # Errors
///
/// Returns `EncodeError::InvalidPixelData` if the source fails
/// [`RgbSource::validate`].
///
/// # Example
///
/// ```
/// use rgb565_core::decode::DecodedImage;
/// use rgb565_core::encode::encode_rgb565;
///
/// let image = DecodedImage::new(1, 1, vec![200, 100, 50]);
/// assert_eq!(encode_rgb565(&image).unwrap(), vec![0x26, 0xCB]);
/// ```
pub fn encode_rgb565<S: RgbSource + ?Sized>(image: &S) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;
    let mut out = vec![0u8; encoded_len(image.width(), image.height())];
    encode_band(image, 0, &mut out)?;
    Ok(out)
}

/// Encode an image into a caller-provided buffer.
///
/// # Errors
///
/// Returns `EncodeError::OutOfRange` if `out` is not exactly
/// `width * height * 2` bytes long, or `EncodeError::InvalidPixelData` if
/// the source fails [`RgbSource::validate`].
pub fn encode_rgb565_into<S: RgbSource + ?Sized>(
    image: &S,
    out: &mut [u8],
) -> Result<(), EncodeError> {
    image.validate()?;
    let expected = encoded_len(image.width(), image.height());
    if out.len() != expected {
        return Err(EncodeError::OutOfRange {
            offset: expected,
            len: out.len(),
        });
    }
    encode_band(image, 0, out)
}

/// Encode an image using up to `threads` worker threads.
///
/// The output buffer is split into disjoint bands of whole rows, one per
/// worker, so the result is byte-identical to [`encode_rgb565`]. A thread
/// count of 0 or 1 encodes on the calling thread.
pub fn encode_rgb565_parallel<S: RgbSource + Sync + ?Sized>(
    image: &S,
    threads: usize,
) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;
    let (width, height) = (image.width(), image.height());
    if threads <= 1 || height < 2 || width == 0 {
        return encode_rgb565(image);
    }

    let mut out = vec![0u8; encoded_len(width, height)];
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let rows_per_band = (height as usize).div_ceil(threads);

    std::thread::scope(|scope| {
        let workers: Vec<_> = out
            .chunks_mut(rows_per_band * row_bytes)
            .enumerate()
            .map(|(i, band)| {
                let first_row = (i * rows_per_band) as u32;
                scope.spawn(move || encode_band(image, first_row, band))
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect::<Result<(), EncodeError>>()
    })?;

    Ok(out)
}

/// Encode the rows starting at `first_row` into `band`.
///
/// `band` holds whole rows; its length decides how many rows are written.
fn encode_band<S: RgbSource + ?Sized>(
    image: &S,
    first_row: u32,
    band: &mut [u8],
) -> Result<(), EncodeError> {
    let width = image.width();
    if width == 0 || band.is_empty() {
        return Ok(());
    }

    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let base = first_row as usize * row_bytes;
    let len = band.len();

    for (row, dst_row) in band.chunks_mut(row_bytes).enumerate() {
        let y = first_row + row as u32;
        for x in 0..width {
            let offset = x as usize * BYTES_PER_PIXEL;
            let dst = dst_row
                .get_mut(offset..offset + BYTES_PER_PIXEL)
                .ok_or(EncodeError::OutOfRange {
                    offset: base + row * row_bytes + offset,
                    len,
                })?;

            let [r, g, b] = image.rgb(x, y);
            dst.copy_from_slice(&rgb888_to_rgb565(r, g, b).to_le_bytes());
        }
    }

    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
