use anyhow::Result;
use std::fs;
use std::path::Path;

// Base data directory
pub const DATA_DIR: &str = "data";

// Downloaded filing JSON documents
pub const FILINGS_DIR: &str = "data/filings";

// Rendered one-pager reports
pub const REPORTS_DIR: &str = "data/reports";

pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
