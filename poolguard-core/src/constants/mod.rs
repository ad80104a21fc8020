//! Constants for PoolGuard Core
//!
//! Centralized numeric limits and labels used by the estimator, the band
//! classification and the controller mapping layer.
//!
//! ## Organization
//!
//! - **Chemistry**: pH domain, ORP guard thresholds, sentinel outputs
//! - **Bands**: dashboard thresholds for pH, chlorine and water temperature
//! - **Sensors**: names and status codes the pool controllers report
//!
//! Always use these constants instead of magic numbers. Include units in
//! new names.

/// pH domain, ORP guards and output precision for chlorine estimation.
pub mod chemistry;

/// Water quality band thresholds.
pub mod bands;

/// Sensor names and controller status codes.
pub mod sensors;

// Re-export commonly used constants for convenience
pub use chemistry::{
    PH_DOMAIN_MIN, PH_DOMAIN_MAX,
    ORP_SIGNAL_FLOOR_MV, ORP_SATURATION_MV,
    NO_SIGNAL_PPM, SATURATED_PPM, PPM_DECIMAL_SCALE,
};

pub use bands::{
    PH_OPTIMAL_MIN, PH_OPTIMAL_MAX, PH_CAUTION_MIN, PH_CAUTION_MAX,
    CHLORINE_OPTIMAL_MIN_PPM, CHLORINE_OPTIMAL_MAX_PPM,
    CHLORINE_CAUTION_MIN_PPM, CHLORINE_CAUTION_MAX_PPM,
    WATER_TEMP_WARM_FROM_C, WATER_TEMP_HOT_FROM_C,
};

pub use sensors::{
    SENSOR_PH, SENSOR_TEMPERATURE, SENSOR_ORP, SENSOR_FLOW, FLOW_STATUS_FLOWING,
    STATUS_UNASSOCIATED, STATUS_CONNECTED, STATUS_DISCONNECTED,
    STATUS_CODE_UNASSOCIATED, STATUS_CODE_CONNECTED, STATUS_CODE_DISCONNECTED,
    FALLBACK_POOL_NAME_PREFIX,
};
