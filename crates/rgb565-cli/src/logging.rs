//! Logger setup for the command line tool.

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

/// Set up logging at the given level.
pub fn setup_logger(level: LevelFilter) -> Result<()> {
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")?;

    debug!("Log level: {}", level);
    Ok(())
}
