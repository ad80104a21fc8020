//! ORP to Free Chlorine Estimation
//!
//! Converts an ORP reading (mV) and a pH reading into an estimated free
//! chlorine concentration (ppm) using the empirical reference curves.
//!
//! ## Algorithm
//!
//! ```text
//! 1. pH or ORP is zero/NaN (sensor not reporting)  -> 0
//! 2. clamp pH into [6.5, 8.0]
//! 3. ORP < 400 mV                                  -> 0
//!    ORP > 950 mV                                  -> 5
//! 4. pick the curve with the nearest anchor pH (lower anchor wins ties)
//! 5. ORP below the curve's lowest point            -> straight line through
//!                                                     the origin and that point
//! 6. ORP inside a curve interval                   -> linear interpolation
//! 7. ORP above the curve's highest point           -> highest tabulated ppm
//! ```
//!
//! Steps 5 and 6 are rounded to one decimal place. The sentinels are exact.
//!
//! ## Sentinel Ambiguity
//!
//! The plain number conflates "no probe" and "ORP too low" into `0`. Callers
//! that need to tell them apart use [`ChlorineEstimator::assess`], whose
//! [`ChlorineEstimate`] keeps the branch that produced the value while
//! [`ChlorineEstimate::ppm`] still yields exactly the same number.
//!
//! ## Concurrency
//!
//! Pure function over a `const` table. Safe to call from any number of
//! threads or interrupt handlers without coordination.

use crate::constants::chemistry::{
    NO_SIGNAL_PPM, ORP_SATURATION_MV, ORP_SIGNAL_FLOOR_MV, PH_DOMAIN_MAX, PH_DOMAIN_MIN,
    PPM_DECIMAL_SCALE, SATURATED_PPM,
};
use crate::reference::{ReferenceTable, STANDARD_TABLE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Instantaneous pH and ORP snapshot for one pool
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// pH (pH units)
    pub ph: f64,
    /// Oxidation-reduction potential (mV)
    pub orp_mv: f64,
}

impl Reading {
    /// Create a reading
    pub const fn new(ph: f64, orp_mv: f64) -> Self {
        Self { ph, orp_mv }
    }
}

/// Outcome of a chlorine estimation, keeping track of which branch produced it
///
/// With `alloc` the serde form is internally tagged (`{"kind": "interpolated",
/// "ppm": 1.2, "anchor_ph": 7.2}`). Serde-only `no_std` builds fall back to
/// serde's external tagging, since tagged deserialization buffers content.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(all(feature = "serde", feature = "alloc"), serde(tag = "kind"))]
pub enum ChlorineEstimate {
    /// pH or ORP missing (zero or NaN)
    NoSignal,

    /// ORP below the signal floor
    BelowRange,

    /// ORP above the saturation threshold
    Saturated,

    /// ORP below the curve, extrapolated linearly towards zero
    Extrapolated {
        /// Estimate rounded to one decimal (ppm)
        ppm: f64,
        /// Anchor pH of the curve used
        anchor_ph: f64,
    },

    /// ORP inside the curve, interpolated between control points
    Interpolated {
        /// Estimate rounded to one decimal (ppm)
        ppm: f64,
        /// Anchor pH of the curve used
        anchor_ph: f64,
    },

    /// ORP above the curve but below saturation, pinned to the curve maximum
    AboveCurve {
        /// Highest tabulated concentration (ppm)
        ppm: f64,
        /// Anchor pH of the curve used
        anchor_ph: f64,
    },
}

impl ChlorineEstimate {
    /// Estimated free chlorine in ppm, sentinels included
    pub fn ppm(&self) -> f64 {
        match *self {
            Self::NoSignal | Self::BelowRange => NO_SIGNAL_PPM,
            Self::Saturated => SATURATED_PPM,
            Self::Extrapolated { ppm, .. }
            | Self::Interpolated { ppm, .. }
            | Self::AboveCurve { ppm, .. } => ppm,
        }
    }

    /// Anchor pH of the curve used, if a curve was consulted
    pub fn anchor_ph(&self) -> Option<f64> {
        match *self {
            Self::NoSignal | Self::BelowRange | Self::Saturated => None,
            Self::Extrapolated { anchor_ph, .. }
            | Self::Interpolated { anchor_ph, .. }
            | Self::AboveCurve { anchor_ph, .. } => Some(anchor_ph),
        }
    }

    /// False only when a sensor was not reporting
    pub fn has_signal(&self) -> bool {
        !matches!(self, Self::NoSignal)
    }

    /// True for the fixed outputs that carry no measurement detail
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::NoSignal | Self::BelowRange | Self::Saturated)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChlorineEstimate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoSignal =>
                defmt::write!(fmt, "no signal"),
            Self::BelowRange =>
                defmt::write!(fmt, "ORP below range"),
            Self::Saturated =>
                defmt::write!(fmt, "ORP saturated"),
            Self::Extrapolated { ppm, anchor_ph } =>
                defmt::write!(fmt, "{} ppm (extrapolated, pH {})", ppm, anchor_ph),
            Self::Interpolated { ppm, anchor_ph } =>
                defmt::write!(fmt, "{} ppm (pH {})", ppm, anchor_ph),
            Self::AboveCurve { ppm, anchor_ph } =>
                defmt::write!(fmt, "{} ppm (curve max, pH {})", ppm, anchor_ph),
        }
    }
}

/// Free chlorine estimator over a reference table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChlorineEstimator<'a> {
    table: ReferenceTable<'a>,
}

impl Default for ChlorineEstimator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChlorineEstimator<'static> {
    /// Estimator over the built-in reference table
    pub const fn standard() -> Self {
        Self { table: STANDARD_TABLE }
    }
}

impl<'a> ChlorineEstimator<'a> {
    /// Estimator over a custom table (see `ReferenceTable::try_new`)
    pub const fn with_table(table: ReferenceTable<'a>) -> Self {
        Self { table }
    }

    /// Reference table in use
    pub fn table(&self) -> &ReferenceTable<'a> {
        &self.table
    }

    /// Estimated free chlorine in ppm
    pub fn estimate(&self, ph: f64, orp_mv: f64) -> f64 {
        self.assess(ph, orp_mv).ppm()
    }

    /// Estimated free chlorine in ppm for a reading
    pub fn estimate_reading(&self, reading: Reading) -> f64 {
        self.estimate(reading.ph, reading.orp_mv)
    }

    /// Tagged estimate for a reading
    pub fn assess_reading(&self, reading: Reading) -> ChlorineEstimate {
        self.assess(reading.ph, reading.orp_mv)
    }

    /// Tagged estimate, recording which branch produced the value
    pub fn assess(&self, ph: f64, orp_mv: f64) -> ChlorineEstimate {
        if is_missing(ph) || is_missing(orp_mv) {
            return ChlorineEstimate::NoSignal;
        }

        let clamped_ph = ph.clamp(PH_DOMAIN_MIN, PH_DOMAIN_MAX);

        if orp_mv < ORP_SIGNAL_FLOOR_MV {
            return ChlorineEstimate::BelowRange;
        }
        if orp_mv > ORP_SATURATION_MV {
            return ChlorineEstimate::Saturated;
        }

        let Some(curve) = self.table.nearest(clamped_ph) else {
            return ChlorineEstimate::NoSignal;
        };
        let anchor_ph = curve.ph();

        if let Some(lowest) = curve.lowest() {
            if orp_mv < lowest.orp_mv {
                let ppm = round_ppm(orp_mv / lowest.orp_mv * lowest.ppm);
                return ChlorineEstimate::Extrapolated { ppm, anchor_ph };
            }
        }

        match curve.interpolate(orp_mv) {
            Some(ppm) => ChlorineEstimate::Interpolated {
                ppm: round_ppm(ppm),
                anchor_ph,
            },
            None => ChlorineEstimate::AboveCurve {
                ppm: curve.max_ppm().unwrap_or(NO_SIGNAL_PPM),
                anchor_ph,
            },
        }
    }
}

/// Estimated free chlorine (ppm) from pH and ORP, using the built-in table
///
/// Never fails and always returns a finite number. `0` means "no reading or
/// ORP too low", `5` means "ORP saturated"; anything else has at most one
/// decimal digit.
///
/// ```
/// use poolguard_core::estimate;
///
/// assert_eq!(estimate(7.0, 805.0), 2.0);
/// assert_eq!(estimate(7.0, 0.0), 0.0);
/// assert_eq!(estimate(7.4, 990.0), 5.0);
/// ```
pub fn estimate(ph: f64, orp_mv: f64) -> f64 {
    ChlorineEstimator::standard().estimate(ph, orp_mv)
}

/// Zero and NaN both mean the sensor is not reporting
fn is_missing(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

/// Round the exact value of `ppm` to one decimal place, ties away from zero
///
/// `ppm * 10` may itself round onto a `.5` the exact value never reaches
/// (1.15 is stored as 1.1499999999999999). The fused multiply-add recovers
/// that product's rounding error and settles such false ties downwards.
fn round_ppm(ppm: f64) -> f64 {
    let scaled = ppm * PPM_DECIMAL_SCALE;
    let error = libm::fma(ppm, PPM_DECIMAL_SCALE, -scaled);

    let mut tenths = libm::round(scaled);
    if libm::fabs(tenths - scaled) == 0.5 {
        if scaled > 0.0 && error < 0.0 {
            tenths -= 1.0;
        } else if scaled < 0.0 && error > 0.0 {
            tenths += 1.0;
        }
    }
    tenths / PPM_DECIMAL_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ControlPoint, ReferenceCurve};

    #[test]
    fn zero_inputs_mean_no_signal() {
        let estimator = ChlorineEstimator::standard();

        assert_eq!(estimator.assess(0.0, 700.0), ChlorineEstimate::NoSignal);
        assert_eq!(estimator.assess(7.4, 0.0), ChlorineEstimate::NoSignal);
        assert_eq!(estimator.assess(-0.0, 700.0), ChlorineEstimate::NoSignal);
        assert_eq!(estimate(0.0, 0.0), 0.0);
    }

    #[test]
    fn nan_inputs_mean_no_signal() {
        assert_eq!(estimate(f64::NAN, 700.0), 0.0);
        assert_eq!(estimate(7.2, f64::NAN), 0.0);
    }

    #[test]
    fn orp_guards() {
        let estimator = ChlorineEstimator::standard();

        assert_eq!(estimator.assess(7.4, 399.9), ChlorineEstimate::BelowRange);
        assert_eq!(estimator.assess(7.4, -120.0), ChlorineEstimate::BelowRange);
        assert_eq!(estimator.assess(7.4, 950.1), ChlorineEstimate::Saturated);
        assert_eq!(estimate(7.4, 399.9), 0.0);
        assert_eq!(estimate(7.4, 950.1), 5.0);
    }

    #[test]
    fn infinite_inputs_stay_finite() {
        assert_eq!(estimate(7.4, f64::INFINITY), 5.0);
        assert_eq!(estimate(7.4, f64::NEG_INFINITY), 0.0);
        assert_eq!(estimate(f64::INFINITY, 715.0), estimate(8.0, 715.0));
        assert_eq!(estimate(f64::NEG_INFINITY, 715.0), estimate(6.5, 715.0));
    }

    #[test]
    fn exact_control_points() {
        assert_eq!(estimate(7.0, 715.0), 1.0);
        assert_eq!(estimate(7.0, 805.0), 2.0);
        assert_eq!(estimate(7.8, 753.0), 2.0);
    }

    #[test]
    fn interpolation_midpoint() {
        let estimator = ChlorineEstimator::standard();

        assert_eq!(
            estimator.assess(7.0, 760.0),
            ChlorineEstimate::Interpolated { ppm: 1.5, anchor_ph: 7.0 }
        );
    }

    #[test]
    fn interpolation_rounds_to_one_decimal() {
        // pH 7.4 curve: 695 -> 1.0, 779 -> 2.0; 720 mV is 25/84 of the way
        assert_eq!(estimate(7.4, 720.0), 1.3);
    }

    #[test]
    fn interpolation_near_half_tenth_rounds_exact_value() {
        // 1 + 13.5/90 is stored just below 1.15
        assert_eq!(
            ChlorineEstimator::standard().assess(7.0, 728.5),
            ChlorineEstimate::Interpolated { ppm: 1.1, anchor_ph: 7.0 }
        );
        // 2 + 2.5/50 is stored just below 2.05
        assert_eq!(estimate(7.4, 781.5), 2.0);
    }

    #[test]
    fn extrapolation_near_half_tenth_rounds_exact_value() {
        // 437.5 / 625 * 0.5 is stored just below 0.35
        assert_eq!(
            ChlorineEstimator::standard().assess(7.0, 437.5),
            ChlorineEstimate::Extrapolated { ppm: 0.3, anchor_ph: 7.0 }
        );
    }

    #[test]
    fn round_ppm_uses_exact_value() {
        assert_eq!(round_ppm(1.15), 1.1);
        assert_eq!(round_ppm(2.05), 2.0);
        assert_eq!(round_ppm(0.35), 0.3);
        // Stored just above the tie
        assert_eq!(round_ppm(0.45), 0.5);
        // Exact ties go away from zero
        assert_eq!(round_ppm(0.25), 0.3);
        assert_eq!(round_ppm(1.75), 1.8);
        assert_eq!(round_ppm(-0.25), -0.3);
        assert_eq!(round_ppm(4.0), 4.0);
        assert_eq!(round_ppm(0.0), 0.0);
    }

    #[test]
    fn lower_extrapolation_through_origin() {
        let estimator = ChlorineEstimator::standard();

        // 500 / 625 * 0.5 = 0.4
        assert_eq!(
            estimator.assess(7.0, 500.0),
            ChlorineEstimate::Extrapolated { ppm: 0.4, anchor_ph: 7.0 }
        );
        // 400 / 625 * 0.5 = 0.32
        assert_eq!(estimate(7.0, 400.0), 0.3);
    }

    #[test]
    fn above_curve_pins_to_curve_maximum() {
        let estimator = ChlorineEstimator::standard();

        assert_eq!(
            estimator.assess(7.0, 900.0),
            ChlorineEstimate::AboveCurve { ppm: 4.0, anchor_ph: 7.0 }
        );
        assert_eq!(estimate(7.8, 833.0), 4.0);
        assert_eq!(estimate(7.0, 950.0), 4.0);
    }

    #[test]
    fn nearest_anchor_selection() {
        // 7.3 is marginally closer to 7.2 in binary floating point:
        // 705 -> 1.0, 792 -> 2.0, so 715 mV gives 1 + 10/87
        assert_eq!(estimate(7.3, 715.0), 1.1);
        assert_eq!(ChlorineEstimator::standard().assess(7.3, 715.0).anchor_ph(), Some(7.2));
    }

    #[test]
    fn exact_tie_uses_lower_anchor() {
        // 7.5 is equidistant from 7.4 and 7.6; 695 mV is the 7.4 curve's 1.0 ppm point
        assert_eq!(estimate(7.5, 695.0), 1.0);
    }

    #[test]
    fn ph_clamped_to_domain() {
        assert_eq!(estimate(6.0, 700.0), estimate(6.5, 700.0));
        assert_eq!(estimate(9.0, 700.0), estimate(8.0, 700.0));
        assert_eq!(estimate(-3.0, 700.0), estimate(6.5, 700.0));
    }

    #[test]
    fn reading_wrappers_match_plain_call() {
        let estimator = ChlorineEstimator::default();
        let reading = Reading::new(7.2, 740.0);

        assert_eq!(estimator.estimate_reading(reading), estimate(7.2, 740.0));
        assert_eq!(estimator.assess_reading(reading), estimator.assess(7.2, 740.0));
    }

    #[test]
    fn estimate_flags() {
        assert!(!ChlorineEstimate::NoSignal.has_signal());
        assert!(ChlorineEstimate::BelowRange.has_signal());
        assert!(ChlorineEstimate::Saturated.is_sentinel());
        assert!(!ChlorineEstimate::Interpolated { ppm: 1.2, anchor_ph: 7.4 }.is_sentinel());
        assert_eq!(ChlorineEstimate::Saturated.anchor_ph(), None);
    }

    #[cfg(all(feature = "serde", feature = "alloc"))]
    #[test]
    fn serde_form_is_tagged_by_kind() {
        let outcome = ChlorineEstimate::Interpolated { ppm: 1.2, anchor_ph: 7.2 };
        let json = serde_json::to_value(outcome).unwrap();

        assert_eq!(json["kind"], "interpolated");
        assert_eq!(serde_json::from_value::<ChlorineEstimate>(json).unwrap(), outcome);
        assert_eq!(
            serde_json::to_value(ChlorineEstimate::NoSignal).unwrap(),
            serde_json::json!({"kind": "no_signal"})
        );
    }

    #[test]
    fn custom_table_changes_ceiling() {
        // Short curve topping out well below saturation
        const LOW: [ControlPoint; 2] = [
            ControlPoint::new(0.5, 600.0),
            ControlPoint::new(1.5, 700.0),
        ];
        let curves = [ReferenceCurve::new(7.4, &LOW)];
        let table = ReferenceTable::try_new(&curves).unwrap();
        let estimator = ChlorineEstimator::with_table(table);

        assert_eq!(estimator.estimate(7.4, 650.0), 1.0);
        assert_eq!(estimator.estimate(7.4, 800.0), 1.5);
        assert_eq!(estimator.estimate(7.4, 960.0), 5.0);
    }
}
