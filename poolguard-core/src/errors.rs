//! Error Types for Reference Table Construction
//!
//! The estimator itself never fails: missing or out-of-range readings map
//! to sentinel outputs instead (see `ChlorineEstimate`). The only fallible
//! operation in the core is accepting a caller-supplied reference table,
//! which has to satisfy the shape the interpolation relies on.
//!
//! Errors are `Copy` and carry no heap data, so they can be returned from
//! `no_std` code and stored freely.
//!
//! ```rust
//! use poolguard_core::{ControlPoint, ReferenceCurve, ReferenceTable, ReferenceError};
//!
//! const SINGLE: [ControlPoint; 1] = [ControlPoint::new(1.0, 700.0)];
//! let curves = [ReferenceCurve::new(7.4, &SINGLE)];
//!
//! match ReferenceTable::try_new(&curves) {
//!     Err(ReferenceError::TooFewPoints { anchor_ph, points }) => {
//!         assert_eq!(anchor_ph, 7.4);
//!         assert_eq!(points, 1);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for reference table operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Reasons a reference table cannot be used for estimation
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReferenceError {
    /// Table has no curves at all
    #[error("Reference table has no curves")]
    Empty,

    /// Anchor pH values are not strictly ascending
    #[error("Anchor pH {anchor_ph} does not follow {previous_ph}")]
    AnchorsNotAscending {
        /// Anchor that broke the order
        anchor_ph: f64,
        /// Anchor just before it
        previous_ph: f64,
    },

    /// Curve cannot define an interpolation interval
    #[error("Curve at pH {anchor_ph} has {points} control points, need at least 2")]
    TooFewPoints {
        /// Anchor pH of the curve
        anchor_ph: f64,
        /// Number of control points found
        points: usize,
    },

    /// Control points are not strictly increasing in both ppm and ORP
    #[error("Curve at pH {anchor_ph} is not monotonic at point {index}")]
    NotMonotonic {
        /// Anchor pH of the curve
        anchor_ph: f64,
        /// Index of the first offending control point
        index: usize,
    },

    /// A value in the table is NaN or infinite
    #[error("Invalid value: not a finite number")]
    InvalidValue,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReferenceError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Empty =>
                defmt::write!(fmt, "Reference table empty"),
            Self::AnchorsNotAscending { anchor_ph, previous_ph } =>
                defmt::write!(fmt, "Anchor pH {} after {}", anchor_ph, previous_ph),
            Self::TooFewPoints { anchor_ph, points } =>
                defmt::write!(fmt, "Curve pH {}: {} points", anchor_ph, points),
            Self::NotMonotonic { anchor_ph, index } =>
                defmt::write!(fmt, "Curve pH {} not monotonic at {}", anchor_ph, index),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
        }
    }
}
