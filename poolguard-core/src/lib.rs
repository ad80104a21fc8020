//! Core chemistry engine for PoolGuard
//!
//! Turns raw pool sensor readings into the numbers a dashboard shows.
//! The heart of it is the ORP-to-free-chlorine estimator: an empirical
//! reference table, nearest-pH curve selection and piecewise-linear
//! interpolation.
//!
//! Key constraints:
//! - `no_std` capable, no heap allocation anywhere
//! - The estimator never fails; degraded input maps to sentinel values
//! - The reference table is a `const`, shared read-only by every caller
//!
//! ```
//! use poolguard_core::{estimate, ChlorineEstimator, ChlorineEstimate};
//!
//! // pH 7.0 and 715 mV sit exactly on the 1.0 ppm control point
//! assert_eq!(estimate(7.0, 715.0), 1.0);
//!
//! // The tagged outcome tells "no probe" apart from "measured"
//! let estimator = ChlorineEstimator::standard();
//! assert_eq!(estimator.assess(7.2, 0.0), ChlorineEstimate::NoSignal);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod errors;
pub mod estimator;
pub mod reference;
pub mod status;

// Public API
pub use errors::{ReferenceError, ReferenceResult};
pub use estimator::{estimate, ChlorineEstimate, ChlorineEstimator, Reading};
pub use reference::{ControlPoint, ReferenceCurve, ReferenceTable, STANDARD_TABLE};
pub use status::{Band, BandThresholds, RangeBands, TemperatureBand, TemperatureBands};

/// Crate version, as recorded in Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
