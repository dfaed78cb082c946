//! Per-line MD5 filter command.

use std::io;

use anyhow::{Context, Result};
use rd_tools::digest::hash_lines;

pub fn run() -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let count = hash_lines(stdin, stdout).context("Failed to hash stdin")?;
    log::debug!("Hashed {} lines", count);

    Ok(())
}
