//! Batch conversion of image files to raw RGB565.
//!
//! The driver takes an explicit list of input paths and produces one output
//! per input, next to it, with the extension replaced. A file that fails to
//! decode or write is recorded in the [`BatchReport`] and the remaining
//! files are still converted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_file, DecodeError};
use crate::encode::{encode_rgb565_parallel, EncodeError};
use crate::output::{sidecar_path_for, write_raw, write_sidecar, RawDescription};

/// Default extension of the raw output files.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "raw";

/// Default extension of the input files picked up by [`discover_inputs`].
pub const DEFAULT_INPUT_EXTENSION: &str = "bmp";

/// Errors that can occur while converting a single file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The decoded image could not be encoded.
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The output or its sidecar could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output path would replace the input image.
    #[error("Output would overwrite input {}", .0.display())]
    OutputIsInput(PathBuf),
}

/// Options controlling a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Extension given to output files (without the dot).
    pub output_extension: String,
    /// Write a `<output>.json` sidecar with the image dimensions.
    pub write_sidecar: bool,
    /// Worker threads used to encode each image.
    pub threads: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            write_sidecar: false,
            threads: 1,
        }
    }
}

/// Summary of one successfully converted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Source image path.
    pub input: PathBuf,
    /// Raw file written for it.
    pub output: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Size of the raw file in bytes.
    pub byte_len: usize,
}

/// Outcome of [`convert_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted, in input order.
    pub converted: Vec<ConvertedFile>,
    /// Files that failed, in input order, with the reason.
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// True if every input was converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of inputs attempted.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Output path for `input`: same location, extension replaced.
pub fn output_path_for(input: impl AsRef<Path>, extension: &str) -> PathBuf {
    input.as_ref().with_extension(extension)
}

/// List the regular files in `dir` whose extension matches `extension`.
///
/// Matching is case-insensitive and not recursive. Symlinks are followed, so
/// a link to an image is picked up and a link to a directory is not. The
/// result is sorted so runs over the same directory are reproducible.
pub fn discover_inputs(dir: impl AsRef<Path>, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        // Dangling links stay in so the conversion reports them.
        let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(true);
        if !is_file {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert one image file to a raw RGB565 file at `output`.
///
/// The whole buffer is encoded in memory before anything is written, and
/// the write itself is atomic, so a failure never leaves a partial output.
/// If the sidecar cannot be written the raw file is removed again.
///
/// # Errors
///
/// Returns `ConvertError::OutputIsInput` when `output` names the input file
/// (compared case-insensitively), before anything is read.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConvertedFile, ConvertError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    if same_file_name(input, output) {
        return Err(ConvertError::OutputIsInput(input.to_path_buf()));
    }

    let image = decode_file(input)?;
    debug!("Decoded {:?} ({}x{})", input, image.width, image.height);

    let raw = encode_rgb565_parallel(&image, options.threads)?;

    write_raw(output, &raw).map_err(|source| ConvertError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    if options.write_sidecar {
        let description = RawDescription::for_image(image.width, image.height);
        let sidecar = write_sidecar(output, &description).map_err(|source| {
            // A raw file without its sidecar is not a finished conversion.
            let _ = fs::remove_file(output);
            ConvertError::Io {
                path: sidecar_path_for(output),
                source,
            }
        })?;
        debug!("Wrote sidecar {:?}", sidecar);
    }

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        width: image.width,
        height: image.height,
        byte_len: raw.len(),
    })
}

/// True if both paths share a directory and differ at most in ASCII case.
fn same_file_name(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    let a_name = a.file_name().and_then(|n| n.to_str());
    let b_name = b.file_name().and_then(|n| n.to_str());
    match (a_name, b_name) {
        (Some(a_name), Some(b_name)) => {
            a.parent() == b.parent() && a_name.eq_ignore_ascii_case(b_name)
        }
        _ => false,
    }
}

/// Convert every input, continuing past individual failures.
pub fn convert_batch(inputs: &[PathBuf], options: &ConvertOptions) -> BatchReport {
    let mut report = BatchReport::default();

    for input in inputs {
        let output = output_path_for(input, &options.output_extension);
        match convert_file(input, &output, options) {
            Ok(converted) => {
                info!(
                    "Converted {:?} -> {:?} ({}x{}, {} bytes)",
                    converted.input,
                    converted.output,
                    converted.width,
                    converted.height,
                    converted.byte_len
                );
                report.converted.push(converted);
            }
            Err(err) => {
                warn!("Skipping {:?}: {}", input, err);
                report.failed.push((input.clone(), err));
            }
        }
    }

    report
}
