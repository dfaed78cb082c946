//! Natural cubic spline interpolation over four knots.
//!
//! The Bjontegaard metrics fit one curve per codec through its four
//! operating points and integrate it analytically. A natural spline has
//! zero second derivative at both ends, so with four knots only the two
//! interior second derivatives are unknown and the tridiagonal system
//! collapses to a 2x2 solve.
//!
//! ## Key Types
//!
//! - [`NaturalCubicSpline`]: the fitted interpolant
//! - [`CubicSegment`]: one cubic piece, `a + b*t + c*t^2 + d*t^3` with `t = x - x0`

use crate::curve::CURVE_POINTS;
use crate::error::{Error, Result};

const SEGMENTS: usize = CURVE_POINTS - 1;

/// One cubic piece of a spline, valid on `[x0, x1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    /// Left end of the segment.
    pub x0: f64,
    /// Right end of the segment.
    pub x1: f64,
    /// Constant coefficient.
    pub a: f64,
    /// Linear coefficient.
    pub b: f64,
    /// Quadratic coefficient.
    pub c: f64,
    /// Cubic coefficient.
    pub d: f64,
}

impl CubicSegment {
    /// Evaluate the segment polynomial at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.x0;
        self.a + t * (self.b + t * (self.c + t * self.d))
    }

    /// Antiderivative in local coordinates, zero at `x0`.
    fn primitive(&self, t: f64) -> f64 {
        t * (self.a + t * (self.b / 2.0 + t * (self.c / 3.0 + t * self.d / 4.0)))
    }

    /// Integral over `[lo, hi]` clipped to the segment's own interval.
    ///
    /// Returns 0.0 when the ranges do not overlap.
    #[must_use]
    pub fn integrate(&self, lo: f64, hi: f64) -> f64 {
        let lo = lo.max(self.x0);
        let hi = hi.min(self.x1);
        if lo >= hi {
            return 0.0;
        }
        self.primitive(hi - self.x0) - self.primitive(lo - self.x0)
    }
}

/// Natural cubic spline through four strictly monotonic knots.
///
/// # Example
///
/// ```
/// use rd_tools::interpolation::NaturalCubicSpline;
///
/// // Linear data is reproduced exactly.
/// let spline = NaturalCubicSpline::fit([1.0, 2.0, 3.0, 4.0], [2.0, 4.0, 6.0, 8.0])?;
/// assert!((spline.evaluate(2.5) - 5.0).abs() < 1e-12);
/// assert!((spline.integrate(1.0, 4.0) - 15.0).abs() < 1e-12);
/// # Ok::<(), rd_tools::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    segments: [CubicSegment; SEGMENTS],
}

impl NaturalCubicSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// Knots may be increasing or decreasing. Decreasing knots are reversed
    /// together with their values, which gives the same interpolant.
    #[allow(clippy::needless_range_loop)] // index math mirrors the knot formulas
    pub fn fit(mut xs: [f64; CURVE_POINTS], mut ys: [f64; CURVE_POINTS]) -> Result<Self> {
        if xs.iter().chain(&ys).any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("spline knots must be finite".to_string()));
        }
        if xs[0] > xs[CURVE_POINTS - 1] {
            xs.reverse();
            ys.reverse();
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidInput(format!(
                "spline knots must be strictly monotonic, got {xs:?}"
            )));
        }

        let mut h = [0.0; SEGMENTS];
        let mut slope = [0.0; SEGMENTS];
        for i in 0..SEGMENTS {
            h[i] = xs[i + 1] - xs[i];
            slope[i] = (ys[i + 1] - ys[i]) / h[i];
        }

        // Interior second derivatives; M0 = M3 = 0 for natural boundaries.
        let a11 = 2.0 * (h[0] + h[1]);
        let a12 = h[1];
        let a22 = 2.0 * (h[1] + h[2]);
        let r1 = 6.0 * (slope[1] - slope[0]);
        let r2 = 6.0 * (slope[2] - slope[1]);
        let det = a11 * a22 - a12 * a12;
        let m = [
            0.0,
            (r1 * a22 - a12 * r2) / det,
            (a11 * r2 - a12 * r1) / det,
            0.0,
        ];

        let mut segments = [CubicSegment {
            x0: 0.0,
            x1: 0.0,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        }; SEGMENTS];
        for i in 0..SEGMENTS {
            segments[i] = CubicSegment {
                x0: xs[i],
                x1: xs[i + 1],
                a: ys[i],
                b: slope[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
                c: m[i] / 2.0,
                d: (m[i + 1] - m[i]) / (6.0 * h[i]),
            };
        }

        Ok(Self { segments })
    }

    /// The cubic pieces, ordered by increasing x.
    #[must_use]
    pub fn segments(&self) -> &[CubicSegment; SEGMENTS] {
        &self.segments
    }

    /// Domain covered by the knots, `(min, max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.segments[0].x0, self.segments[SEGMENTS - 1].x1)
    }

    /// Evaluate the spline. Outside the knots the boundary segment is extended.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let segment = self
            .segments
            .iter()
            .find(|s| x <= s.x1)
            .unwrap_or(&self.segments[SEGMENTS - 1]);
        segment.evaluate(x)
    }

    /// Definite integral over `[lo, hi]`, restricted to the knot domain.
    ///
    /// Returns 0.0 when `lo >= hi`.
    #[must_use]
    pub fn integrate(&self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return 0.0;
        }
        self.segments.iter().map(|s| s.integrate(lo, hi)).sum()
    }
}
