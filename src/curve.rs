//! Rate-distortion curves.
//!
//! A [`Curve`] holds the fixed set of operating points a codec configuration
//! was measured at. Bitrates are kept as given; the log-domain view used by
//! the Bjontegaard fits is derived on demand.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of operating points in every curve.
pub const CURVE_POINTS: usize = 4;

/// A single (bitrate, PSNR) operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateDistortionPoint {
    /// Bitrate in kbps. Always positive.
    pub bitrate_kbps: f64,
    /// Quality in dB.
    pub psnr_db: f64,
}

/// A rate-distortion curve of exactly [`CURVE_POINTS`] points.
///
/// Points keep the caller's order. No sorting is done, so reference and
/// test curves must be listed in a consistent order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    points: [RateDistortionPoint; CURVE_POINTS],
}

impl Curve {
    /// Build a curve from index-matched bitrate and PSNR values.
    ///
    /// # Example
    ///
    /// ```
    /// use rd_tools::Curve;
    ///
    /// let curve = Curve::new(&[1000.0, 2000.0, 4000.0, 8000.0], &[30.0, 33.0, 36.0, 39.0])?;
    /// assert!((curve.log_rates()[0] - 3.0).abs() < 1e-12);
    /// # Ok::<(), rd_tools::Error>(())
    /// ```
    pub fn new(bitrates: &[f64], psnrs: &[f64]) -> Result<Self> {
        check_len("bitrate", bitrates)?;
        check_len("PSNR", psnrs)?;

        let mut points = [RateDistortionPoint {
            bitrate_kbps: 0.0,
            psnr_db: 0.0,
        }; CURVE_POINTS];

        for (i, (&bitrate_kbps, &psnr_db)) in bitrates.iter().zip(psnrs).enumerate() {
            if !bitrate_kbps.is_finite() || bitrate_kbps <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "bitrate must be positive, got {bitrate_kbps} at index {i}"
                )));
            }
            if !psnr_db.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "PSNR must be finite, got {psnr_db} at index {i}"
                )));
            }
            points[i] = RateDistortionPoint {
                bitrate_kbps,
                psnr_db,
            };
        }

        Ok(Self { points })
    }

    /// Build a curve from already paired points.
    pub fn from_points(points: &[RateDistortionPoint]) -> Result<Self> {
        let bitrates: Vec<f64> = points.iter().map(|p| p.bitrate_kbps).collect();
        let psnrs: Vec<f64> = points.iter().map(|p| p.psnr_db).collect();
        Self::new(&bitrates, &psnrs)
    }

    /// The operating points, in input order.
    #[must_use]
    pub fn points(&self) -> &[RateDistortionPoint; CURVE_POINTS] {
        &self.points
    }

    /// `log10(bitrate)` for every point.
    #[must_use]
    pub fn log_rates(&self) -> [f64; CURVE_POINTS] {
        self.points.map(|p| p.bitrate_kbps.log10())
    }

    /// PSNR for every point.
    #[must_use]
    pub fn psnrs(&self) -> [f64; CURVE_POINTS] {
        self.points.map(|p| p.psnr_db)
    }
}

fn check_len(what: &str, values: &[f64]) -> Result<()> {
    if values.len() != CURVE_POINTS {
        return Err(Error::InvalidInput(format!(
            "expected {CURVE_POINTS} {what} values, but {} values given",
            values.len()
        )));
    }
    Ok(())
}
