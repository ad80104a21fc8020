//! Chemistry Limits for Chlorine Estimation
//!
//! Bounds applied to raw pH and ORP readings before the reference table is
//! consulted, plus the fixed outputs used when a reading cannot be mapped.

// ===== pH DOMAIN =====

/// Lowest pH the estimator considers (pH units).
///
/// Readings below saturate here. The reference curves do not reach this
/// low, so clamped readings resolve to the lowest anchor curve.
pub const PH_DOMAIN_MIN: f64 = 6.5;

/// Highest pH the estimator considers (pH units).
///
/// Readings above saturate here and resolve to the highest anchor curve.
pub const PH_DOMAIN_MAX: f64 = 8.0;

// ===== ORP GUARDS =====

/// ORP below which no meaningful free chlorine residual exists (mV).
///
/// Typical of unsanitised or heavily contaminated water.
pub const ORP_SIGNAL_FLOOR_MV: f64 = 400.0;

/// ORP above which the estimate is pinned (mV).
///
/// Beyond typical shock-chlorination levels the empirical curves are not
/// modelled.
pub const ORP_SATURATION_MV: f64 = 950.0;

// ===== SENTINEL OUTPUTS =====

/// Output for a missing sensor or an ORP below the signal floor (ppm).
///
/// Ambiguous by construction: it also reads as "no chlorine". Use
/// `ChlorineEstimate` when the difference matters.
pub const NO_SIGNAL_PPM: f64 = 0.0;

/// Output for an ORP above the saturation threshold (ppm).
pub const SATURATED_PPM: f64 = 5.0;

// ===== PRECISION =====

/// Scale used to round estimates to one decimal place.
pub const PPM_DECIMAL_SCALE: f64 = 10.0;
