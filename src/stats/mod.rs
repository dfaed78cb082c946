//! Bjontegaard-delta metrics.
//!
//! BD-rate and BD-PSNR compare two rate-distortion curves by fitting a
//! natural cubic spline through each and averaging the gap between the two
//! fits over the range where both curves have data.
//!
//! - [`bd_rate`]: average bitrate difference at equal PSNR, in percent
//! - [`bd_psnr`]: average PSNR difference at equal bitrate, in dB
//! - [`BdMetrics`]: both at once
//!
//! Curves that do not overlap at all give 0.0 rather than an error.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::curve::{CURVE_POINTS, Curve};
use crate::error::Result;
use crate::interpolation::NaturalCubicSpline;

/// BD-rate and BD-PSNR of a test curve against a reference curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BdMetrics {
    /// Average bitrate difference in percent. Negative = test is better.
    pub bd_rate: f64,
    /// Average PSNR difference in dB. Positive = test is better.
    pub bd_psnr: f64,
}

impl BdMetrics {
    /// Compute both metrics for `test` relative to `reference`.
    pub fn compute(reference: &Curve, test: &Curve) -> Result<Self> {
        Ok(Self {
            bd_rate: bd_rate(reference, test)?,
            bd_psnr: bd_psnr(reference, test)?,
        })
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Calculate BD-Rate (Bjontegaard Delta Rate).
///
/// Fits `log10(bitrate)` as a function of PSNR for both curves and averages
/// the difference over the overlapping PSNR range.
///
/// # Returns
///
/// BD-Rate as a percentage. Negative = test is better.
///
/// # Example
///
/// ```
/// use rd_tools::{Curve, stats::bd_rate};
///
/// let reference = Curve::new(&[1000.0, 2000.0, 4000.0, 8000.0], &[30.0, 35.0, 40.0, 45.0])?;
/// let test = Curve::new(&[900.0, 1800.0, 3600.0, 7200.0], &[30.0, 35.0, 40.0, 45.0])?;
///
/// let bd = bd_rate(&reference, &test)?;
/// assert!((bd + 10.0).abs() < 1e-9);
/// # Ok::<(), rd_tools::Error>(())
/// ```
pub fn bd_rate(reference: &Curve, test: &Curve) -> Result<f64> {
    let ref_psnr = reference.psnrs();
    let tst_psnr = test.psnrs();

    let Some((lo, hi)) = overlap(&ref_psnr, &tst_psnr) else {
        warn!("BD-rate: PSNR ranges do not overlap, reporting 0");
        return Ok(0.0);
    };

    let ref_fit = NaturalCubicSpline::fit(ref_psnr, reference.log_rates())?;
    let tst_fit = NaturalCubicSpline::fit(tst_psnr, test.log_rates())?;

    let avg_ref = ref_fit.integrate(lo, hi) / (hi - lo);
    let avg_tst = tst_fit.integrate(lo, hi) / (hi - lo);
    debug!("BD-rate: PSNR range [{lo}, {hi}], avg log-rate ref={avg_ref} test={avg_tst}");

    Ok((10_f64.powf(avg_tst - avg_ref) - 1.0) * 100.0)
}

/// Calculate BD-PSNR (Bjontegaard Delta PSNR).
///
/// Fits PSNR as a function of `log10(bitrate)` for both curves and averages
/// the difference over the overlapping log-rate range.
///
/// # Returns
///
/// Average PSNR difference in dB. Positive = test is better.
pub fn bd_psnr(reference: &Curve, test: &Curve) -> Result<f64> {
    let ref_log = reference.log_rates();
    let tst_log = test.log_rates();

    let Some((lo, hi)) = overlap(&ref_log, &tst_log) else {
        warn!("BD-PSNR: log-rate ranges do not overlap, reporting 0");
        return Ok(0.0);
    };

    let ref_fit = NaturalCubicSpline::fit(ref_log, reference.psnrs())?;
    let tst_fit = NaturalCubicSpline::fit(tst_log, test.psnrs())?;

    let avg_ref = ref_fit.integrate(lo, hi) / (hi - lo);
    let avg_tst = tst_fit.integrate(lo, hi) / (hi - lo);
    debug!("BD-PSNR: log-rate range [{lo}, {hi}], avg PSNR ref={avg_ref} test={avg_tst}");

    Ok(avg_tst - avg_ref)
}

/// [`bd_rate`] over raw bitrate/PSNR vectors.
///
/// Each slice must hold exactly four values and every bitrate must be
/// positive.
pub fn bd_rate_from_slices(
    ref_bitrate: &[f64],
    ref_psnr: &[f64],
    tst_bitrate: &[f64],
    tst_psnr: &[f64],
) -> Result<f64> {
    let reference = Curve::new(ref_bitrate, ref_psnr)?;
    let test = Curve::new(tst_bitrate, tst_psnr)?;
    bd_rate(&reference, &test)
}

/// [`bd_psnr`] over raw bitrate/PSNR vectors.
pub fn bd_psnr_from_slices(
    ref_bitrate: &[f64],
    ref_psnr: &[f64],
    tst_bitrate: &[f64],
    tst_psnr: &[f64],
) -> Result<f64> {
    let reference = Curve::new(ref_bitrate, ref_psnr)?;
    let test = Curve::new(tst_bitrate, tst_psnr)?;
    bd_psnr(&reference, &test)
}

/// Intersection of the value ranges of two curves' axes.
///
/// `None` when the intersection is empty or a single point.
fn overlap(a: &[f64; CURVE_POINTS], b: &[f64; CURVE_POINTS]) -> Option<(f64, f64)> {
    let lo = min(a).max(min(b));
    let hi = max(a).min(max(b));
    (lo < hi).then_some((lo, hi))
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
