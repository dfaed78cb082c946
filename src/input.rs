//! Parsing of numeric lists given on the command line.
//!
//! Values may be separated by commas, semicolons or whitespace, in any
//! mix: `"40433.88, 7622.75;2394.49 1017.62"` is four values.

use crate::error::{Error, Result};

/// Split a list of floats on `,`, `;` or whitespace. Empty tokens are skipped.
///
/// # Example
///
/// ```
/// use rd_tools::input::parse_float_list;
///
/// let values = parse_float_list("40370.12;7587.00, 2390.00  1017.10")?;
/// assert_eq!(values, vec![40370.12, 7587.0, 2390.0, 1017.1]);
/// # Ok::<(), rd_tools::Error>(())
/// ```
pub fn parse_float_list(input: &str) -> Result<Vec<f64>> {
    input
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|e| Error::InvalidInput(format!("'{token}' is not a number: {e}")))
        })
        .collect()
}

/// Parse a `"rate psnr"` pair. Extra values after the first two are ignored.
pub fn parse_rate_psnr_pair(input: &str) -> Result<(f64, f64)> {
    match parse_float_list(input)?.as_slice() {
        [rate, psnr, ..] => Ok((*rate, *psnr)),
        _ => Err(Error::InvalidInput(format!(
            "expected a bitrate and a PSNR value, got '{input}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_separators() {
        let values = parse_float_list("40433.88 7622.75 2394.49 1017.62").unwrap();
        assert_eq!(values, vec![40433.88, 7622.75, 2394.49, 1017.62]);

        let values = parse_float_list("37.58,35.38,33.90,32.06").unwrap();
        assert_eq!(values.len(), 4);

        let values = parse_float_list(" 40.52  38.21,;36.52\t34.82 ").unwrap();
        assert_eq!(values, vec![40.52, 38.21, 36.52, 34.82]);
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_float_list("").unwrap().is_empty());
        assert!(parse_float_list(" , ; ").unwrap().is_empty());
    }

    #[test]
    fn test_bad_number() {
        assert!(matches!(parse_float_list("1.0, abc"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_pair() {
        assert_eq!(parse_rate_psnr_pair("40433.88,37.58").unwrap(), (40433.88, 37.58));
        assert_eq!(parse_rate_psnr_pair("2394.49 33.90").unwrap(), (2394.49, 33.9));
        assert!(parse_rate_psnr_pair("2394.49").is_err());
    }
}
