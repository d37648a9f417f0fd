//! Writing raw RGB565 buffers to disk.
//!
//! The raw format carries no header, so the dimensions can optionally be
//! recorded in a JSON sidecar next to the output (`logo.raw` ->
//! `logo.raw.json`).

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::encoded_len;

/// Format tag written to sidecar files.
pub const RAW_FORMAT: &str = "rgb565le";

/// Out-of-band description of a raw buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDescription {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel format tag, always [`RAW_FORMAT`].
    pub format: String,
    /// Length of the raw file in bytes.
    pub byte_len: usize,
}

impl RawDescription {
    /// Describe the raw buffer for an image of the given dimensions.
    pub fn for_image(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: RAW_FORMAT.to_string(),
            byte_len: encoded_len(width, height),
        }
    }
}

/// Write `bytes` to `path` without ever leaving a partial file at `path`.
///
/// Data goes to a sibling temporary file first and is renamed over the
/// target once fully written. On failure the temporary file is removed.
pub fn write_raw(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = temp_path_for(path);

    let result = write_synced(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        // Best-effort cleanup; the write error is what gets reported.
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Path of the JSON sidecar for a raw file.
pub fn sidecar_path_for(raw_path: impl AsRef<Path>) -> PathBuf {
    append_to_file_name(raw_path.as_ref(), ".json")
}

/// Write the sidecar for `raw_path` and return its location.
pub fn write_sidecar(
    raw_path: impl AsRef<Path>,
    description: &RawDescription,
) -> io::Result<PathBuf> {
    let path = sidecar_path_for(raw_path);
    let json = serde_json::to_vec_pretty(description)?;
    write_raw(&path, &json)?;
    Ok(path)
}

/// Read a sidecar written by [`write_sidecar`].
pub fn read_sidecar(path: impl AsRef<Path>) -> io::Result<RawDescription> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    append_to_file_name(path, ".tmp")
}

fn append_to_file_name(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scratch_dir;

    #[test]
    fn test_write_raw_creates_file() {
        let dir = scratch_dir("write-raw");
        let path = dir.join("logo.raw");

        write_raw(&path, &[0x26, 0xCB]).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![0x26, 0xCB]);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_raw_empty_buffer() {
        let dir = scratch_dir("write-empty");
        let path = dir.join("empty.raw");

        write_raw(&path, &[]).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_write_raw_replaces_existing() {
        let dir = scratch_dir("write-replace");
        let path = dir.join("logo.raw");
        fs::write(&path, vec![1u8; 64]).unwrap();

        write_raw(&path, &[9, 9]).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![9, 9]);
    }

    #[test]
    fn test_write_raw_missing_directory() {
        let dir = scratch_dir("write-missing");
        let path = dir.join("no-such-dir").join("logo.raw");

        let err = write_raw(&path, &[1, 2]).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_raw_target_is_directory() {
        let dir = scratch_dir("write-onto-dir");
        let path = dir.join("occupied.raw");
        fs::create_dir(&path).unwrap();

        assert!(write_raw(&path, &[1, 2]).is_err());
        assert!(!temp_path_for(&path).exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path_for("assets/logo.raw"),
            PathBuf::from("assets/logo.raw.json")
        );
    }

    #[test]
    fn test_sidecar_roundtrip() {
        let dir = scratch_dir("sidecar");
        let raw = dir.join("splash.raw");
        let description = RawDescription::for_image(140, 40);

        let path = write_sidecar(&raw, &description).unwrap();

        assert_eq!(path, dir.join("splash.raw.json"));
        let read = read_sidecar(&path).unwrap();
        assert_eq!(read, description);
        assert_eq!(read.byte_len, 11200);
        assert_eq!(read.format, "rgb565le");
    }

    #[test]
    fn test_sidecar_json_shape() {
        let json = serde_json::to_value(RawDescription::for_image(2, 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "width": 2,
                "height": 1,
                "format": "rgb565le",
                "byte_len": 4
            })
        );
    }

    #[test]
    fn test_read_sidecar_rejects_garbage() {
        let dir = scratch_dir("sidecar-garbage");
        let path = dir.join("bad.raw.json");
        fs::write(&path, b"{not json").unwrap();

        let err = read_sidecar(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
