//! Pool Controller Snapshots and Sensor Mapping
//!
//! ## Overview
//!
//! The dashboard backend polls pool controllers and returns a JSON snapshot
//! of each controller with its sensors' latest values. This crate owns the
//! shape of that snapshot and the mapping from it to one status record per
//! pool, with the free chlorine estimate and quality bands filled in by
//! `poolguard-core`.
//!
//! ```text
//!  backend JSON ──> ControllerSnapshot ──> PoolMapper ──> Vec<PoolStatus> ──> display
//!                   (controller.rs)        (pool.rs)
//! ```
//!
//! ## Tolerant Parsing
//!
//! Controllers are field devices with years of firmware history. The
//! snapshot parser therefore:
//!
//! 1. Ignores unknown keys
//! 2. Accepts numbers as JSON numbers or numeric strings
//! 3. Treats `null`, missing and unparsable values alike ("not reporting")
//! 4. Accepts controller status as the backend's label or its raw code
//!
//! A missing sensor value becomes `0` in the mapped record, which the
//! estimator reads as "no signal".
//!
//! ## Usage Example
//!
//! ```rust
//! use poolguard_schemas::{ControllerSnapshot, PoolMapper};
//!
//! let json = r#"{
//!   "controllers": [{
//!     "CtrlId": 17, "CtrlName": "Main pool", "Status": "Conectado", "Volume": 120000,
//!     "sensors": [
//!       {"SensorId": 1, "SensorName": "pH", "Value": 7.0, "UpperTh": 7.4},
//!       {"SensorId": 2, "SensorName": "Cloro libre", "Value": "715"},
//!       {"SensorId": 3, "SensorName": "Flujo", "Status": 0}
//!     ]
//!   }]
//! }"#;
//!
//! let snapshot = ControllerSnapshot::from_json(json)?;
//! let pools = PoolMapper::default().map_snapshot(&snapshot);
//!
//! assert_eq!(pools[0].chlorine_ppm, 1.0);
//! assert!(pools[0].online && pools[0].has_flow);
//! # Ok::<(), poolguard_schemas::SchemaError>(())
//! ```

pub mod controller;
pub mod pool;

pub use controller::{Controller, ControllerSnapshot, ControllerStatus, Sensor};
pub use pool::{MappingConfig, PoolMapper, PoolStatus};

/// Schema-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum SchemaError {
    #[error("Failed to parse snapshot: {0}")]
    ParseError(String),

    #[error("Failed to parse mapping config: {0}")]
    ConfigError(String),
}
