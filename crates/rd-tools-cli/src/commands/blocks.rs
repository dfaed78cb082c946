//! Block-mode counting commands for flag logs and decoder traces.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rd_tools::trace::{count_flag_lines, count_trace};

pub fn run_flags(input: PathBuf) -> Result<()> {
    let reader = open(&input)?;
    let stats = count_flag_lines(reader)
        .with_context(|| format!("Failed to parse flag log {}", input.display()))?;
    println!("{}", stats);
    Ok(())
}

pub fn run_trace(input: PathBuf) -> Result<()> {
    let reader = open(&input)?;
    let stats = count_trace(reader)
        .with_context(|| format!("Failed to parse trace {}", input.display()))?;
    println!("{}", stats);
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    log::debug!("Reading: {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(BufReader::new(file))
}
