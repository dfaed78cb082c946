//! # rd-tools
//!
//! Small utilities for video codec evaluation pipelines.
//!
//! The core is the Bjontegaard-delta calculator: given a reference and a
//! test rate-distortion curve of four points each, it reports the average
//! bitrate saving (BD-rate) and quality gain (BD-PSNR) of the test curve.
//!
//! ## Quick Start
//!
//! ```
//! use rd_tools::{BdMetrics, Curve};
//!
//! let reference = Curve::new(
//!     &[40433.88, 7622.75, 2394.49, 1017.62],
//!     &[37.58, 35.38, 33.90, 32.06],
//! )?;
//! let test = Curve::new(
//!     &[40370.12, 7587.00, 2390.00, 1017.10],
//!     &[37.60, 35.40, 33.92, 32.08],
//! )?;
//!
//! let metrics = BdMetrics::compute(&reference, &test)?;
//! assert!(metrics.bd_rate < 0.0);
//! assert!(metrics.bd_psnr > 0.0);
//! # Ok::<(), rd_tools::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`curve`]: Rate-distortion curves
//! - [`interpolation`]: Natural cubic spline fitting and integration
//! - [`stats`]: BD-rate and BD-PSNR
//! - [`input`]: Parsing of command-line value lists
//! - [`import`]: CSV import of curves
//! - [`digest`]: Per-line MD5 filter
//! - [`trace`]: Intra/inter/skip counters for codec debug logs

pub mod curve;
pub mod digest;
pub mod error;
pub mod import;
pub mod input;
pub mod interpolation;
pub mod stats;
pub mod trace;

// Re-export commonly used types
pub use curve::{CURVE_POINTS, Curve, RateDistortionPoint};
pub use error::{Error, Result};
pub use import::{CurveImporter, CurveSchema};
pub use stats::{BdMetrics, bd_psnr, bd_rate};
pub use trace::BlockStats;
