//! Empirical ORP Reference Curves
//!
//! ## Chemistry Background
//!
//! ORP (oxidation-reduction potential) is the voltage a platinum electrode
//! develops in pool water. Free chlorine is the dominant oxidiser, so ORP
//! rises with chlorine concentration, but only the hypochlorous acid (HOCl)
//! fraction is strongly active:
//!
//! ```text
//! HOCl <=> H+ + OCl-        pKa ≈ 7.5 at 25°C
//!
//! pH 7.0  ->  ~75% HOCl
//! pH 7.5  ->  ~50% HOCl
//! pH 8.0  ->  ~25% HOCl
//! ```
//!
//! The same ppm of free chlorine therefore reads a lower ORP as pH rises.
//! For a fixed pH the relationship is roughly logarithmic: each doubling of
//! chlorine adds a diminishing number of millivolts.
//!
//! ## Table Design
//!
//! Rather than fitting a closed-form model, PoolGuard stores measured
//! (ppm, mV) control points for a handful of anchor pH values and
//! interpolates between them:
//!
//! ```text
//!   pH  |  0.5   1.0   2.0   3.0   4.0   ppm
//! ------+---------------------------------
//!  7.0  |  625   715   805   858   896   mV
//!  7.2  |  618   705   792   843   880
//!  7.4  |  611   695   779   829   864
//!  7.6  |  604   685   766   814   848
//!  7.8  |  597   675   753   799   832
//! ```
//!
//! Curves are selected by nearest anchor, not blended across pH. Adjacent
//! anchors differ by ~10 mV at equal ppm, well inside typical probe drift.
//!
//! Memory usage: 25 control points * 16 bytes = 400 bytes, all in `.rodata`.
//!
//! ## Invariants
//!
//! - At least one curve, anchors strictly ascending
//! - Every curve has at least two control points
//! - Control points strictly increase in both ppm and mV
//!
//! The built-in [`STANDARD_TABLE`] satisfies these by construction and is not
//! re-checked at runtime. Custom tables go through [`ReferenceTable::try_new`].

use crate::errors::{ReferenceError, ReferenceResult};

/// One measured (ppm, mV) pair on a reference curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Free chlorine concentration (ppm)
    pub ppm: f64,
    /// ORP observed at that concentration (mV)
    pub orp_mv: f64,
}

impl ControlPoint {
    /// Create a control point
    pub const fn new(ppm: f64, orp_mv: f64) -> Self {
        Self { ppm, orp_mv }
    }
}

/// Control points measured at one fixed pH
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCurve<'a> {
    ph: f64,
    points: &'a [ControlPoint],
}

impl<'a> ReferenceCurve<'a> {
    /// Create a curve for an anchor pH; points must be in ascending order
    pub const fn new(ph: f64, points: &'a [ControlPoint]) -> Self {
        Self { ph, points }
    }

    /// Anchor pH this curve was measured at
    pub fn ph(&self) -> f64 {
        self.ph
    }

    /// Control points in ascending order
    pub fn points(&self) -> &'a [ControlPoint] {
        self.points
    }

    /// Smallest-ppm control point, the anchor for extrapolating downwards
    pub fn lowest(&self) -> Option<&'a ControlPoint> {
        self.points.first()
    }

    /// Largest-ppm control point
    pub fn highest(&self) -> Option<&'a ControlPoint> {
        self.points.last()
    }

    /// Highest tabulated concentration, used as a flat ceiling
    pub fn max_ppm(&self) -> Option<f64> {
        self.highest().map(|point| point.ppm)
    }

    /// Linear interpolation over the first interval containing `orp_mv`
    ///
    /// Intervals are inclusive at both ends and scanned in ascending order,
    /// so a value sitting exactly on a shared control point resolves in the
    /// lower interval (both give the same result). Returns `None` when the
    /// value is outside every interval. The result is not rounded.
    pub fn interpolate(&self, orp_mv: f64) -> Option<f64> {
        self.points.windows(2).find_map(|pair| {
            let (p1, p2) = (pair[0], pair[1]);
            if orp_mv >= p1.orp_mv && orp_mv <= p2.orp_mv {
                let fraction = (orp_mv - p1.orp_mv) / (p2.orp_mv - p1.orp_mv);
                Some(p1.ppm + fraction * (p2.ppm - p1.ppm))
            } else {
                None
            }
        })
    }

    /// Check this curve can be interpolated
    fn validate(&self) -> ReferenceResult<()> {
        if !self.ph.is_finite() {
            return Err(ReferenceError::InvalidValue);
        }

        if self.points.len() < 2 {
            return Err(ReferenceError::TooFewPoints {
                anchor_ph: self.ph,
                points: self.points.len(),
            });
        }

        if self
            .points
            .iter()
            .any(|p| !p.ppm.is_finite() || !p.orp_mv.is_finite())
        {
            return Err(ReferenceError::InvalidValue);
        }

        for (index, pair) in self.points.windows(2).enumerate() {
            if pair[1].ppm <= pair[0].ppm || pair[1].orp_mv <= pair[0].orp_mv {
                return Err(ReferenceError::NotMonotonic {
                    anchor_ph: self.ph,
                    index: index + 1,
                });
            }
        }

        Ok(())
    }
}

/// Set of reference curves keyed by anchor pH
///
/// Cheap to copy: it only borrows the curve slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTable<'a> {
    curves: &'a [ReferenceCurve<'a>],
}

impl<'a> ReferenceTable<'a> {
    /// Build a table from caller-supplied curves, checking its invariants
    pub fn try_new(curves: &'a [ReferenceCurve<'a>]) -> ReferenceResult<Self> {
        if curves.is_empty() {
            log_warn!("Reference table rejected: no curves");
            return Err(ReferenceError::Empty);
        }

        for curve in curves {
            if let Err(e) = curve.validate() {
                log_warn!("Reference table rejected: {}", e);
                return Err(e);
            }
        }

        for pair in curves.windows(2) {
            if pair[1].ph <= pair[0].ph {
                log_warn!("Reference table rejected: anchors out of order");
                return Err(ReferenceError::AnchorsNotAscending {
                    anchor_ph: pair[1].ph,
                    previous_ph: pair[0].ph,
                });
            }
        }

        Ok(Self { curves })
    }

    /// All curves in ascending anchor order
    pub fn curves(&self) -> &'a [ReferenceCurve<'a>] {
        self.curves
    }

    /// Anchor pH values in ascending order
    pub fn anchors(&self) -> impl Iterator<Item = f64> + 'a {
        self.curves.iter().map(|curve| curve.ph)
    }

    /// Curve whose anchor is closest to `ph`
    ///
    /// Scans anchors in ascending order and only moves on when a later
    /// anchor is strictly closer, so the lower anchor wins an exact tie.
    pub fn nearest(&self, ph: f64) -> Option<&'a ReferenceCurve<'a>> {
        let (first, rest) = self.curves.split_first()?;
        let nearest = rest.iter().fold(first, |best, curve| {
            if libm::fabs(curve.ph - ph) < libm::fabs(best.ph - ph) {
                curve
            } else {
                best
            }
        });
        Some(nearest)
    }
}

const PH_7_0: [ControlPoint; 5] = [
    ControlPoint::new(0.5, 625.0),
    ControlPoint::new(1.0, 715.0),
    ControlPoint::new(2.0, 805.0),
    ControlPoint::new(3.0, 858.0),
    ControlPoint::new(4.0, 896.0),
];

// Midway between the 7.0 and 7.4 measurements
const PH_7_2: [ControlPoint; 5] = [
    ControlPoint::new(0.5, 618.0),
    ControlPoint::new(1.0, 705.0),
    ControlPoint::new(2.0, 792.0),
    ControlPoint::new(3.0, 843.0),
    ControlPoint::new(4.0, 880.0),
];

const PH_7_4: [ControlPoint; 5] = [
    ControlPoint::new(0.5, 611.0),
    ControlPoint::new(1.0, 695.0),
    ControlPoint::new(2.0, 779.0),
    ControlPoint::new(3.0, 829.0),
    ControlPoint::new(4.0, 864.0),
];

const PH_7_6: [ControlPoint; 5] = [
    ControlPoint::new(0.5, 604.0),
    ControlPoint::new(1.0, 685.0),
    ControlPoint::new(2.0, 766.0),
    ControlPoint::new(3.0, 814.0),
    ControlPoint::new(4.0, 848.0),
];

const PH_7_8: [ControlPoint; 5] = [
    ControlPoint::new(0.5, 597.0),
    ControlPoint::new(1.0, 675.0),
    ControlPoint::new(2.0, 753.0),
    ControlPoint::new(3.0, 799.0),
    ControlPoint::new(4.0, 832.0),
];

const STANDARD_CURVES: [ReferenceCurve<'static>; 5] = [
    ReferenceCurve::new(7.0, &PH_7_0),
    ReferenceCurve::new(7.2, &PH_7_2),
    ReferenceCurve::new(7.4, &PH_7_4),
    ReferenceCurve::new(7.6, &PH_7_6),
    ReferenceCurve::new(7.8, &PH_7_8),
];

/// Built-in reference table, anchors at pH 7.0 to 7.8 in 0.2 steps
pub const STANDARD_TABLE: ReferenceTable<'static> = ReferenceTable {
    curves: &STANDARD_CURVES,
};
