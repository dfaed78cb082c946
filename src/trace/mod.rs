//! Block-mode counters for codec debug logs.
//!
//! Two log shapes are supported:
//!
//! - **Flag logs** ([`count_flag_lines`]): one block per line, `<skip> <intra/inter>`
//!   flags in columns 0 and 2 (`"1 x"` = skip, `"0 1"` = inter, `"0 0"` = intra).
//! - **Reference-decoder traces** ([`TraceCounter`]): verbose HM-style
//!   `TraceDec.txt`/`TraceEnc.txt` symbol dumps. Counting starts at the first
//!   P slice; skipped CUs come from `SkipFlag` symbols, other CUs from the
//!   `predmode` of their `CoeffNxN` lines.
//!
//! Skipped blocks are counted as inter as well.

use std::fmt;
use std::io::BufRead;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of blocks seen per coding mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    /// Intra-coded blocks.
    pub intra: u64,
    /// Inter-coded blocks, skipped ones included.
    pub inter: u64,
    /// Skipped blocks.
    pub skip: u64,
}

impl BlockStats {
    fn add_skip(&mut self) {
        self.skip += 1;
        self.inter += 1;
    }
}

impl fmt::Display for BlockStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numIntra:{} numInter:{} numSkip:{}",
            self.intra, self.inter, self.skip
        )
    }
}

/// Count blocks in a flag log.
///
/// Lines starting with anything other than `0` or `1` are ignored.
///
/// # Example
///
/// ```
/// use rd_tools::trace::count_flag_lines;
///
/// let stats = count_flag_lines("1 0\n0 1\n0 0\n".as_bytes())?;
/// assert_eq!(stats.to_string(), "numIntra:1 numInter:2 numSkip:1");
/// # Ok::<(), rd_tools::Error>(())
/// ```
pub fn count_flag_lines<R: BufRead>(reader: R) -> Result<BlockStats> {
    let mut stats = BlockStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let bytes = line.as_bytes();
        match bytes.first() {
            Some(b'1') => stats.add_skip(),
            Some(b'0') => match bytes.get(2) {
                Some(b'1') => stats.inter += 1,
                Some(b'0') => stats.intra += 1,
                _ => {
                    return Err(Error::TraceParse {
                        line: idx + 1,
                        reason: "second flag expected but not found".to_string(),
                    });
                }
            },
            _ => {}
        }
    }

    Ok(stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first P slice header.
    SeekSlice,
    /// P slice header seen, waiting for its `POC:` line.
    SeekPoc,
    /// Counting every block until end of input.
    Counting,
}

/// Counter for reference-decoder symbol traces.
#[derive(Debug, Clone)]
pub struct TraceCounter {
    skip_flag: Regex,
    coeff: Regex,
}

impl TraceCounter {
    /// Compile the trace line patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            skip_flag: Regex::new(r"SkipFlag.*uiSymbol: 1")?,
            coeff: Regex::new(r"CoeffNxN.*predmode=.")?,
        })
    }

    /// Count blocks from the first P slice to the end of the trace.
    ///
    /// Returns all-zero stats when the trace has no P slice.
    pub fn count<R: BufRead>(&self, reader: R) -> Result<BlockStats> {
        let mut stats = BlockStats::default();
        let mut state = ScanState::SeekSlice;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            match state {
                ScanState::SeekSlice => {
                    if line.contains("slice_type") && line.ends_with('1') {
                        state = ScanState::SeekPoc;
                    }
                    continue;
                }
                ScanState::SeekPoc => {
                    if !line.contains("POC:") {
                        continue;
                    }
                    log::debug!("trace: counting from line {}", idx + 1);
                    state = ScanState::Counting;
                }
                ScanState::Counting => {}
            }

            if self.skip_flag.is_match(line) {
                stats.add_skip();
            } else if self.coeff.is_match(line) {
                match line.as_bytes().last() {
                    Some(b'0') => stats.inter += 1,
                    Some(b'1') => stats.intra += 1,
                    _ => {
                        return Err(Error::TraceParse {
                            line: idx + 1,
                            reason: "predmode value expected but not found".to_string(),
                        });
                    }
                }
            }
        }

        Ok(stats)
    }
}

/// Count blocks in a reference-decoder trace with a fresh [`TraceCounter`].
pub fn count_trace<R: BufRead>(reader: R) -> Result<BlockStats> {
    TraceCounter::new()?.count(reader)
}
