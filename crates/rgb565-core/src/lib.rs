//! RGB565 Core - raw bitmap conversion library
//!
//! This crate converts decoded images into headerless RGB565 buffers for
//! displays and firmware that expect packed little-endian 16-bit pixels,
//! and provides the batch driver used by the `rgb565` command line tool.
//!
//! # Module Structure
//!
//! - `decode` - Container decoding via the `image` crate
//! - `source` - The fixed-shape RGB accessor consumed by the encoder
//! - `encode` - RGB888 to RGB565 packing and buffer layout
//! - `output` - Atomic raw file writes and JSON sidecars
//! - `batch` - Per-file conversion and batch runs with error isolation

pub mod batch;
pub mod decode;
pub mod encode;
pub mod output;
pub mod source;

pub use batch::{
    convert_batch, convert_file, discover_inputs, output_path_for, BatchReport, ConvertError,
    ConvertOptions, ConvertedFile,
};
pub use decode::{decode_bytes, decode_file, DecodeError, DecodedImage};
pub use encode::{encode_rgb565, encode_rgb565_parallel, rgb888_to_rgb565, EncodeError};
pub use output::{write_raw, RawDescription};
pub use source::RgbSource;

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Fresh, empty directory under the system temp dir, unique per test.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rgb565-core-{}-{}",
            name,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Save a row-major RGB pixel list as a 24-bit BMP.
    pub fn write_bmp(path: &Path, width: u32, height: u32, pixels: &[[u8; 3]]) {
        assert_eq!(pixels.len(), (width * height) as usize);
        let raw = pixels.iter().flatten().copied().collect();
        let img = image::RgbImage::from_raw(width, height, raw).unwrap();
        img.save_with_format(path, image::ImageFormat::Bmp).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_decode_then_encode_bmp() {
        let dir = test_support::scratch_dir("lib-pipeline");
        let path = dir.join("scenario.bmp");
        test_support::write_bmp(&path, 1, 1, &[[200, 100, 50]]);

        let image = decode_file(&path).unwrap();
        assert_eq!(encode_rgb565(&image).unwrap(), vec![0x26, 0xCB]);
    }

    #[test]
    fn test_rgba_source_encodes_like_rgb() {
        let rgba = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 17]));
        let rgb = DecodedImage::filled(2, 1, [255, 0, 0]);

        assert_eq!(encode_rgb565(&rgba).unwrap(), encode_rgb565(&rgb).unwrap());
    }

    #[test]
    fn test_single_pixel_packing_export() {
        assert_eq!(rgb888_to_rgb565(255, 255, 255), 0xFFFF);
    }
}
