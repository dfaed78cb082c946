//! Per-line MD5 digests.
//!
//! Used to fingerprint decoder output line by line (e.g. per-frame YUV
//! checksums dumped as text) so two runs can be compared with a plain diff.

use std::io::{BufRead, Write};

use md5::{Digest, Md5};

use crate::error::Result;

/// Lowercase hex MD5 of `line`.
///
/// # Example
///
/// ```
/// use rd_tools::digest::line_digest;
///
/// assert_eq!(line_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[must_use]
pub fn line_digest(line: &[u8]) -> String {
    format!("{:x}", Md5::digest(line))
}

/// Write one digest per non-blank input line.
///
/// The hashed bytes are the line as read, including its trailing `\n` when
/// present; a `\r` before it is hashed too. Lines holding only whitespace
/// are skipped. Returns the number of digests written.
pub fn hash_lines<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> Result<usize> {
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if is_blank(&line) {
            continue;
        }

        writeln!(writer, "{}", line_digest(&line))?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Whitespace-only check with the same character set as Python's `str.isspace`.
///
/// Unicode `White_Space` plus the ASCII separators `\x1c`..`\x1f`. Lines that
/// are not valid UTF-8 are never blank.
fn is_blank(line: &[u8]) -> bool {
    std::str::from_utf8(line)
        .is_ok_and(|s| s.chars().all(|c| c.is_whitespace() || matches!(c, '\x1c'..='\x1f')))
}
