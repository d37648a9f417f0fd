//! Command line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use rgb565_core::batch::{DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_EXTENSION};
use rgb565_core::{discover_inputs, ConvertOptions};

#[derive(Debug, Parser)]
#[command(name = "rgb565")]
#[command(about = "Convert bitmap images to raw little-endian RGB565")]
#[command(version)]
pub struct Cli {
    /// Image files to convert. When omitted, every file in --dir with the
    /// --input-ext extension is converted.
    pub inputs: Vec<PathBuf>,

    /// Directory scanned when no inputs are given
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Extension of the files picked up from --dir
    #[arg(long, default_value = DEFAULT_INPUT_EXTENSION)]
    pub input_ext: String,

    /// Extension of the generated raw files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_EXTENSION, value_parser = parse_extension)]
    pub output_ext: String,

    /// Also write <output>.json with width, height and format
    #[arg(short, long)]
    pub sidecar: bool,

    /// Worker threads per image
    #[arg(short = 'j', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Conversion options selected on the command line.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            output_extension: self.output_ext.clone(),
            write_sidecar: self.sidecar,
            threads: self.threads as usize,
        }
    }

    /// Files to convert: the explicit inputs, or the scan of `--dir`.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        if !self.inputs.is_empty() {
            return Ok(self.inputs.clone());
        }
        discover_inputs(&self.dir, &self.input_ext)
            .with_context(|| format!("Failed to scan directory {:?}", self.dir))
    }

    /// Log level selected by `-v` / `-q`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(format!("invalid extension: {:?}", s));
    }
    Ok(ext.to_string())
}
