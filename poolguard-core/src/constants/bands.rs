//! Water Quality Band Thresholds
//!
//! Limits the dashboard uses to flag a pool reading as optimal, worth a
//! look, or out of range. All bounds are inclusive.

// ===== pH =====

/// Lower bound of the optimal pH band.
///
/// Below 7.2 chlorine is aggressive on skin and eyes.
pub const PH_OPTIMAL_MIN: f64 = 7.2;

/// Upper bound of the optimal pH band.
///
/// Above 7.6 chlorine efficiency drops quickly.
pub const PH_OPTIMAL_MAX: f64 = 7.6;

/// Lower bound of the caution pH band.
pub const PH_CAUTION_MIN: f64 = 7.0;

/// Upper bound of the caution pH band.
pub const PH_CAUTION_MAX: f64 = 7.8;

// ===== FREE CHLORINE =====

/// Lower bound of the optimal free chlorine band (ppm).
pub const CHLORINE_OPTIMAL_MIN_PPM: f64 = 1.0;

/// Upper bound of the optimal free chlorine band (ppm).
pub const CHLORINE_OPTIMAL_MAX_PPM: f64 = 2.0;

/// Lower bound of the caution free chlorine band (ppm).
pub const CHLORINE_CAUTION_MIN_PPM: f64 = 0.8;

/// Upper bound of the caution free chlorine band (ppm).
pub const CHLORINE_CAUTION_MAX_PPM: f64 = 2.5;

// ===== WATER TEMPERATURE =====

/// Water temperature from which a pool counts as warm (°C).
pub const WATER_TEMP_WARM_FROM_C: f64 = 25.0;

/// Water temperature from which a pool counts as hot (°C).
///
/// Warm water burns off free chlorine faster and favours algae.
pub const WATER_TEMP_HOT_FROM_C: f64 = 30.0;
