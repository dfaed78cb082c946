//! CSV import for rate-distortion curves.
//!
//! Lets a pipeline hand over a curve as a small CSV file instead of
//! command-line lists. The file needs a header row; the bitrate and PSNR
//! columns are found by name.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rd_tools::import::{CurveImporter, CurveSchema};
//!
//! let schema = CurveSchema::builder()
//!     .bitrate_column("kbps")
//!     .psnr_column("psnr_y")
//!     .build();
//!
//! let curve = CurveImporter::new(schema).import("anchor.csv")?;
//! ```

use std::path::Path;

use crate::curve::{Curve, RateDistortionPoint};
use crate::error::{Error, Result};

/// Column names for curve import.
#[derive(Debug, Clone, Default)]
pub struct CurveSchema {
    /// Column name for the bitrate (kbps).
    pub bitrate_column: Option<String>,
    /// Column name for the PSNR (dB).
    pub psnr_column: Option<String>,
}

impl CurveSchema {
    /// Create a schema builder.
    #[must_use]
    pub fn builder() -> CurveSchemaBuilder {
        CurveSchemaBuilder::default()
    }

    /// Create a schema that auto-detects columns from common names.
    #[must_use]
    pub fn auto_detect() -> Self {
        Self::default()
    }
}

/// Builder for [`CurveSchema`].
#[derive(Debug, Default)]
pub struct CurveSchemaBuilder {
    schema: CurveSchema,
}

impl CurveSchemaBuilder {
    /// Set the bitrate column name.
    #[must_use]
    pub fn bitrate_column(mut self, name: impl Into<String>) -> Self {
        self.schema.bitrate_column = Some(name.into());
        self
    }

    /// Set the PSNR column name.
    #[must_use]
    pub fn psnr_column(mut self, name: impl Into<String>) -> Self {
        self.schema.psnr_column = Some(name.into());
        self
    }

    /// Build the schema.
    #[must_use]
    pub fn build(self) -> CurveSchema {
        self.schema
    }
}

/// Reads a [`Curve`] from a CSV file.
pub struct CurveImporter {
    schema: CurveSchema,
}

impl CurveImporter {
    /// Create a new importer with the given schema.
    #[must_use]
    pub fn new(schema: CurveSchema) -> Self {
        Self { schema }
    }

    /// Create an importer that auto-detects columns.
    #[must_use]
    pub fn auto_detect() -> Self {
        Self::new(CurveSchema::auto_detect())
    }

    /// Import a curve from a CSV file.
    pub fn import(&self, path: impl AsRef<Path>) -> Result<Curve> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        self.read(reader)
    }

    /// Import a curve from any CSV reader.
    pub fn import_reader<R: std::io::Read>(&self, rdr: R) -> Result<Curve> {
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        self.read(reader)
    }

    fn read<R: std::io::Read>(&self, mut reader: csv::Reader<R>) -> Result<Curve> {
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

        let bitrate_idx = find_column(
            &header_refs,
            self.schema.bitrate_column.as_deref(),
            &["bitrate", "bitrate_kbps", "kbps", "rate"],
        )
        .ok_or_else(|| Error::CsvImport {
            line: 1,
            reason: "Could not find bitrate column".to_string(),
        })?;

        let psnr_idx = find_column(
            &header_refs,
            self.schema.psnr_column.as_deref(),
            &["psnr", "psnr_db", "psnr_y", "y_psnr"],
        )
        .ok_or_else(|| Error::CsvImport {
            line: 1,
            reason: "Could not find PSNR column".to_string(),
        })?;

        let mut points = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let line = line_num + 2; // 1-based, after header
            let record = record.map_err(|e| Error::CsvImport {
                line,
                reason: e.to_string(),
            })?;

            points.push(RateDistortionPoint {
                bitrate_kbps: parse_cell(&record, bitrate_idx, line)?,
                psnr_db: parse_cell(&record, psnr_idx, line)?,
            });
        }

        Curve::from_points(&points)
    }
}

fn parse_cell(record: &csv::StringRecord, idx: usize, line: usize) -> Result<f64> {
    let cell = record.get(idx).unwrap_or("");
    cell.parse().map_err(|_| Error::CsvImport {
        line,
        reason: format!("'{cell}' is not a number"),
    })
}

/// Find a column index by configured name, then by aliases.
fn find_column(headers: &[&str], primary: Option<&str>, aliases: &[&str]) -> Option<usize> {
    if let Some(name) = primary {
        if let Some(idx) = find_header_index(headers, name) {
            return Some(idx);
        }
    }

    aliases.iter().find_map(|alias| find_header_index(headers, alias))
}

/// Find a header index by name (case-insensitive).
fn find_header_index(headers: &[&str], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_schema_builder() {
        let schema = CurveSchema::builder().bitrate_column("kbps").psnr_column("y").build();
        assert_eq!(schema.bitrate_column, Some("kbps".to_string()));
        assert_eq!(schema.psnr_column, Some("y".to_string()));
    }

    #[test]
    fn test_find_header_index() {
        let headers = ["QP", "Bitrate", "PSNR"];
        assert_eq!(find_header_index(&headers, "bitrate"), Some(1));
        assert_eq!(find_header_index(&headers, "psnr"), Some(2));
        assert_eq!(find_header_index(&headers, "ssim"), None);
    }

    #[test]
    fn test_import_auto_detect() {
        let data = concat!(
            "qp,kbps,psnr_y\n",
            "22,40433.88,37.58\n",
            "27,7622.75,35.38\n",
            "32,2394.49,33.90\n",
            "37,1017.62,32.06\n",
        );
        let curve = CurveImporter::auto_detect().import_reader(data.as_bytes()).unwrap();
        assert_eq!(curve.points()[0].bitrate_kbps, 40433.88);
        assert_eq!(curve.psnrs(), [37.58, 35.38, 33.90, 32.06]);
    }

    #[test]
    fn test_import_file_with_schema() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size, quality").unwrap();
        writeln!(file, "1000, 30.0").unwrap();
        writeln!(file, "2000, 33.0").unwrap();
        writeln!(file, "4000, 36.0").unwrap();
        writeln!(file, "8000, 39.0").unwrap();

        let schema = CurveSchema::builder().bitrate_column("size").psnr_column("quality").build();
        let curve = CurveImporter::new(schema).import(file.path()).unwrap();
        assert_eq!(curve.psnrs(), [30.0, 33.0, 36.0, 39.0]);
    }

    #[test]
    fn test_missing_column() {
        let data = "rate,ssim\n1,0.9\n";
        let result = CurveImporter::auto_detect().import_reader(data.as_bytes());
        assert!(matches!(result, Err(Error::CsvImport { line: 1, .. })));
    }

    #[test]
    fn test_bad_cell() {
        let data = "rate,psnr\n1000,30\n2000,n/a\n";
        let result = CurveImporter::auto_detect().import_reader(data.as_bytes());
        assert!(matches!(result, Err(Error::CsvImport { line: 3, .. })));
    }

    #[test]
    fn test_wrong_point_count() {
        let data = "rate,psnr\n1000,30\n2000,33\n4000,36\n";
        let result = CurveImporter::auto_detect().import_reader(data.as_bytes());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
