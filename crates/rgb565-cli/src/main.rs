//! rgb565 - convert bitmap images into raw RGB565 buffers
//!
//! Every input produces a headerless `width * height * 2` byte file next to
//! it, with the extension replaced (`logo.bmp` -> `logo.raw`).
//!
//! ```text
//! rgb565                      # every *.bmp in the current directory
//! rgb565 -o bin logo.png      # logo.png -> logo.bin
//! rgb565 --sidecar -j 4 *.bmp # also write logo.raw.json, 4 threads per image
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, info, warn};
use rgb565_core::convert_batch;

mod cli;
mod logging;

use cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::setup_logger(cli.log_level())?;

    let inputs = cli.resolve_inputs()?;
    if inputs.is_empty() {
        warn!("No *.{} files found in {:?}", cli.input_ext, cli.dir);
        return Ok(ExitCode::SUCCESS);
    }

    let options = cli.convert_options();
    debug!("Converting {} file(s) with {:?}", inputs.len(), options);

    let report = convert_batch(&inputs, &options);

    info!("Converted {}/{} file(s)", report.converted.len(), report.total());

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("{} file(s) failed", report.failed.len());
        Ok(ExitCode::FAILURE)
    }
}
