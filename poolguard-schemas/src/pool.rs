//! Pool Status Mapping
//!
//! Turns controller snapshots into one [`PoolStatus`] per pool: the
//! readings the dashboard displays, the free chlorine estimate and the
//! quality bands.
//!
//! ## Mapping Rules
//!
//! - Unassociated controllers are dropped; order is preserved
//! - Sensors are found by name; a missing sensor or value reads as `0`
//! - The pH set point is the pH sensor's upper threshold
//! - Flow is present while the flow switch status is `0` (also when the
//!   switch reports no status at all)
//! - A controller without a name is shown as `"<prefix> <id>"`
//! - Chlorine is estimated from pH and ORP; bands are left empty when the
//!   underlying sensor is not reporting
//!
//! ## Configuration
//!
//! Sensor names and thresholds differ between controller firmware and
//! deployments, so they live in [`MappingConfig`]:
//!
//! ```rust
//! use poolguard_schemas::{MappingConfig, PoolMapper};
//!
//! let config = MappingConfig::from_json(r#"{
//!     "orp_sensor": "ORP",
//!     "thresholds": {"chlorine": {
//!         "optimal_min": 2.0, "optimal_max": 4.0, "caution_min": 1.5, "caution_max": 5.0
//!     }}
//! }"#)?;
//!
//! assert_eq!(config.orp_sensor, "ORP");
//! assert_eq!(config.ph_sensor, "pH");
//! let mapper = PoolMapper::new(config);
//! # Ok::<(), poolguard_schemas::SchemaError>(())
//! ```

use poolguard_core::constants::sensors::{
    FALLBACK_POOL_NAME_PREFIX, FLOW_STATUS_FLOWING, SENSOR_FLOW, SENSOR_ORP, SENSOR_PH,
    SENSOR_TEMPERATURE,
};
use poolguard_core::{
    Band, BandThresholds, ChlorineEstimate, ChlorineEstimator, TemperatureBand,
};
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, ControllerSnapshot, ControllerStatus};
use crate::SchemaError;

/// Sensor names and thresholds for mapping controllers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Name of the pH sensor
    pub ph_sensor: String,
    /// Name of the water temperature sensor
    pub temperature_sensor: String,
    /// Name of the ORP sensor
    pub orp_sensor: String,
    /// Name of the flow switch
    pub flow_sensor: String,
    /// Prefix for pools whose controller has no name
    pub fallback_name_prefix: String,
    /// Band thresholds
    pub thresholds: BandThresholds,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            ph_sensor: SENSOR_PH.to_string(),
            temperature_sensor: SENSOR_TEMPERATURE.to_string(),
            orp_sensor: SENSOR_ORP.to_string(),
            flow_sensor: SENSOR_FLOW.to_string(),
            fallback_name_prefix: FALLBACK_POOL_NAME_PREFIX.to_string(),
            thresholds: BandThresholds::default(),
        }
    }
}

impl MappingConfig {
    /// Parse a config; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::ConfigError(e.to_string()))
    }
}

/// Everything the dashboard shows for one pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStatus {
    /// Controller id
    pub id: String,
    /// Display name
    pub name: String,
    /// Water temperature (°C), 0 when not reporting
    pub temperature_c: f64,
    /// pH, 0 when not reporting
    pub ph: f64,
    /// pH set point
    pub target_ph: Option<f64>,
    /// ORP (mV), 0 when not reporting
    pub orp_mv: f64,
    /// Estimated free chlorine (ppm)
    pub chlorine_ppm: f64,
    /// How the chlorine estimate was obtained
    pub chlorine: ChlorineEstimate,
    /// Water is circulating
    pub has_flow: bool,
    /// Pool volume (liters)
    pub volume_liters: f64,
    /// Controller online
    pub online: bool,
    /// Acid tank low; not reported by current controllers
    pub acid_tank_low: bool,
    /// Chlorine tank low; not reported by current controllers
    pub chlorine_tank_low: bool,
    /// pH band, `None` when the probe is not reporting
    pub ph_band: Option<Band>,
    /// Chlorine band, `None` when a probe is not reporting
    pub chlorine_band: Option<Band>,
    /// Water temperature band, `None` when the probe is not reporting
    pub temperature_band: Option<TemperatureBand>,
}

/// Maps controller snapshots to pool status records
#[derive(Debug, Clone)]
pub struct PoolMapper {
    config: MappingConfig,
    estimator: ChlorineEstimator<'static>,
}

impl Default for PoolMapper {
    fn default() -> Self {
        Self::new(MappingConfig::default())
    }
}

impl PoolMapper {
    /// Mapper using the built-in reference table
    pub fn new(config: MappingConfig) -> Self {
        Self::with_estimator(config, ChlorineEstimator::standard())
    }

    /// Mapper using a specific estimator
    pub fn with_estimator(config: MappingConfig, estimator: ChlorineEstimator<'static>) -> Self {
        Self { config, estimator }
    }

    /// Active configuration
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Map every associated controller in a snapshot
    pub fn map_snapshot(&self, snapshot: &ControllerSnapshot) -> Vec<PoolStatus> {
        self.map_controllers(&snapshot.controllers)
    }

    /// Map every associated controller, preserving order
    pub fn map_controllers(&self, controllers: &[Controller]) -> Vec<PoolStatus> {
        let pools: Vec<PoolStatus> = controllers
            .iter()
            .filter(|ctrl| {
                let associated = ctrl.status != ControllerStatus::Unassociated;
                if !associated {
                    log::debug!("Skipping unassociated controller {}", ctrl.ctrl_id);
                }
                associated
            })
            .map(|ctrl| self.map_controller(ctrl))
            .collect();

        log::debug!("Mapped {} of {} controllers", pools.len(), controllers.len());
        pools
    }

    /// Map a single controller regardless of its status
    pub fn map_controller(&self, ctrl: &Controller) -> PoolStatus {
        let config = &self.config;
        let thresholds = &config.thresholds;

        let ph = self.sensor_value(ctrl, &config.ph_sensor);
        let temperature_c = self.sensor_value(ctrl, &config.temperature_sensor);
        let orp_mv = self.sensor_value(ctrl, &config.orp_sensor);

        let target_ph = ctrl.sensor(&config.ph_sensor).and_then(|s| s.upper_th);
        let flow_status = ctrl
            .sensor(&config.flow_sensor)
            .and_then(|s| s.status)
            .unwrap_or(FLOW_STATUS_FLOWING);

        let chlorine = self.estimator.assess(ph, orp_mv);

        let name = match ctrl.ctrl_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", config.fallback_name_prefix, ctrl.ctrl_id),
        };

        PoolStatus {
            id: ctrl.ctrl_id.clone(),
            name,
            temperature_c,
            ph,
            target_ph,
            orp_mv,
            chlorine_ppm: chlorine.ppm(),
            chlorine,
            has_flow: flow_status == FLOW_STATUS_FLOWING,
            volume_liters: ctrl.volume.unwrap_or(0.0),
            online: ctrl.status == ControllerStatus::Connected,
            acid_tank_low: false,
            chlorine_tank_low: false,
            ph_band: (ph != 0.0).then(|| thresholds.classify_ph(ph)),
            chlorine_band: thresholds.classify_chlorine(&chlorine),
            temperature_band: (temperature_c != 0.0)
                .then(|| thresholds.classify_temperature(temperature_c)),
        }
    }

    /// Latest value of a named sensor, 0 when missing
    fn sensor_value(&self, ctrl: &Controller, name: &str) -> f64 {
        match ctrl.sensor(name).and_then(|s| s.value) {
            Some(value) => value,
            None => {
                log::debug!("Controller {}: no value for sensor {:?}", ctrl.ctrl_id, name);
                0.0
            }
        }
    }
}
