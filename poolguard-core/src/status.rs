//! Water Quality Bands
//!
//! Classifies pool readings into the three levels a dashboard colours by.
//! Thresholds default to the values in `constants::bands` and can be
//! overridden per deployment (with the `serde` feature, straight from JSON).
//!
//! ```text
//!             critical | caution |  optimal  | caution | critical
//! pH          ... 7.0 ---- 7.2 ========= 7.6 ---- 7.8 ...
//! chlorine    ... 0.8 ---- 1.0 ========= 2.0 ---- 2.5 ...   ppm
//! ```
//!
//! Water temperature uses its own scale (cool / warm / hot) since colder
//! water is never a problem for the dashboard.

use crate::constants::bands::{
    CHLORINE_CAUTION_MAX_PPM, CHLORINE_CAUTION_MIN_PPM, CHLORINE_OPTIMAL_MAX_PPM,
    CHLORINE_OPTIMAL_MIN_PPM, PH_CAUTION_MAX, PH_CAUTION_MIN, PH_OPTIMAL_MAX, PH_OPTIMAL_MIN,
    WATER_TEMP_HOT_FROM_C, WATER_TEMP_WARM_FROM_C,
};
use crate::estimator::ChlorineEstimate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quality level of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Band {
    /// Inside the target range
    Optimal,
    /// Drifting, worth a look
    Caution,
    /// Out of range
    Critical,
}

/// Water temperature level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemperatureBand {
    /// Below the warm threshold
    Cool,
    /// Comfortable bathing temperature
    Warm,
    /// Chlorine consumption and algae risk go up
    Hot,
}

/// Nested optimal/caution ranges, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeBands {
    /// Lower bound of the optimal range
    pub optimal_min: f64,
    /// Upper bound of the optimal range
    pub optimal_max: f64,
    /// Lower bound of the caution range
    pub caution_min: f64,
    /// Upper bound of the caution range
    pub caution_max: f64,
}

impl RangeBands {
    /// Default pH ranges
    pub const PH: Self = Self {
        optimal_min: PH_OPTIMAL_MIN,
        optimal_max: PH_OPTIMAL_MAX,
        caution_min: PH_CAUTION_MIN,
        caution_max: PH_CAUTION_MAX,
    };

    /// Default free chlorine ranges (ppm)
    pub const CHLORINE: Self = Self {
        optimal_min: CHLORINE_OPTIMAL_MIN_PPM,
        optimal_max: CHLORINE_OPTIMAL_MAX_PPM,
        caution_min: CHLORINE_CAUTION_MIN_PPM,
        caution_max: CHLORINE_CAUTION_MAX_PPM,
    };

    /// Classify a value; the optimal range is checked first
    pub fn classify(&self, value: f64) -> Band {
        if value >= self.optimal_min && value <= self.optimal_max {
            Band::Optimal
        } else if value >= self.caution_min && value <= self.caution_max {
            Band::Caution
        } else {
            Band::Critical
        }
    }
}

/// Water temperature thresholds (°C)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureBands {
    /// Temperature from which water counts as warm
    pub warm_from_c: f64,
    /// Temperature from which water counts as hot
    pub hot_from_c: f64,
}

impl Default for TemperatureBands {
    fn default() -> Self {
        Self {
            warm_from_c: WATER_TEMP_WARM_FROM_C,
            hot_from_c: WATER_TEMP_HOT_FROM_C,
        }
    }
}

impl TemperatureBands {
    /// Classify a water temperature
    pub fn classify(&self, celsius: f64) -> TemperatureBand {
        if celsius >= self.hot_from_c {
            TemperatureBand::Hot
        } else if celsius >= self.warm_from_c {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Cool
        }
    }
}

/// All thresholds used to classify a pool
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BandThresholds {
    /// pH ranges
    pub ph: RangeBands,
    /// Free chlorine ranges (ppm)
    pub chlorine: RangeBands,
    /// Water temperature thresholds
    pub temperature: TemperatureBands,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            ph: RangeBands::PH,
            chlorine: RangeBands::CHLORINE,
            temperature: TemperatureBands::default(),
        }
    }
}

impl BandThresholds {
    /// Classify a pH reading
    pub fn classify_ph(&self, ph: f64) -> Band {
        self.ph.classify(ph)
    }

    /// Classify a chlorine estimate; `None` when no sensor was reporting
    pub fn classify_chlorine(&self, estimate: &ChlorineEstimate) -> Option<Band> {
        estimate
            .has_signal()
            .then(|| self.chlorine.classify(estimate.ppm()))
    }

    /// Classify a water temperature reading
    pub fn classify_temperature(&self, celsius: f64) -> TemperatureBand {
        self.temperature.classify(celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_bands() {
        let bands = BandThresholds::default();

        assert_eq!(bands.classify_ph(7.4), Band::Optimal);
        assert_eq!(bands.classify_ph(7.2), Band::Optimal);
        assert_eq!(bands.classify_ph(7.6), Band::Optimal);
        assert_eq!(bands.classify_ph(7.1), Band::Caution);
        assert_eq!(bands.classify_ph(7.8), Band::Caution);
        assert_eq!(bands.classify_ph(6.9), Band::Critical);
        assert_eq!(bands.classify_ph(8.2), Band::Critical);
    }

    #[test]
    fn chlorine_bands() {
        let bands = BandThresholds::default();
        let at = |ppm| ChlorineEstimate::Interpolated { ppm, anchor_ph: 7.4 };

        assert_eq!(bands.classify_chlorine(&at(1.5)), Some(Band::Optimal));
        assert_eq!(bands.classify_chlorine(&at(0.9)), Some(Band::Caution));
        assert_eq!(bands.classify_chlorine(&at(2.5)), Some(Band::Caution));
        assert_eq!(bands.classify_chlorine(&at(3.0)), Some(Band::Critical));
        assert_eq!(bands.classify_chlorine(&ChlorineEstimate::Saturated), Some(Band::Critical));
        assert_eq!(bands.classify_chlorine(&ChlorineEstimate::BelowRange), Some(Band::Critical));
    }

    #[test]
    fn chlorine_without_signal_is_unclassified() {
        let bands = BandThresholds::default();
        assert_eq!(bands.classify_chlorine(&ChlorineEstimate::NoSignal), None);
    }

    #[test]
    fn temperature_bands() {
        let bands = BandThresholds::default();

        assert_eq!(bands.classify_temperature(22.0), TemperatureBand::Cool);
        assert_eq!(bands.classify_temperature(25.0), TemperatureBand::Warm);
        assert_eq!(bands.classify_temperature(29.9), TemperatureBand::Warm);
        assert_eq!(bands.classify_temperature(30.0), TemperatureBand::Hot);
    }

    #[test]
    fn custom_ranges() {
        // Spa kept a little higher on chlorine
        let spa = RangeBands {
            optimal_min: 2.0,
            optimal_max: 4.0,
            caution_min: 1.5,
            caution_max: 5.0,
        };

        assert_eq!(spa.classify(3.0), Band::Optimal);
        assert_eq!(spa.classify(1.6), Band::Caution);
        assert_eq!(spa.classify(1.0), Band::Critical);
    }
}
