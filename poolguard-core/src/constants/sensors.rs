//! Pool Controller Sensor Labels
//!
//! Names and codes as the pool controllers report them. The labels are the
//! controller firmware's own (Spanish) strings and must match exactly.

// ===== SENSOR NAMES =====

/// pH probe.
pub const SENSOR_PH: &str = "pH";

/// Water temperature probe (°C).
pub const SENSOR_TEMPERATURE: &str = "Temperatura";

/// ORP probe (mV). Controllers label it by what it is used for.
pub const SENSOR_ORP: &str = "Cloro libre";

/// Flow switch. Its `Status` is 0 while water is moving.
pub const SENSOR_FLOW: &str = "Flujo";

/// Flow switch status meaning "water is flowing".
pub const FLOW_STATUS_FLOWING: f64 = 0.0;

// ===== CONTROLLER STATUS =====

/// Controller no longer linked to the account.
pub const STATUS_UNASSOCIATED: &str = "Desasociado";

/// Controller online.
pub const STATUS_CONNECTED: &str = "Conectado";

/// Controller offline.
pub const STATUS_DISCONNECTED: &str = "Desconectado";

/// Numeric code for [`STATUS_UNASSOCIATED`].
pub const STATUS_CODE_UNASSOCIATED: i64 = 0;

/// Numeric code for [`STATUS_CONNECTED`].
pub const STATUS_CODE_CONNECTED: i64 = 1;

/// Numeric code for [`STATUS_DISCONNECTED`].
pub const STATUS_CODE_DISCONNECTED: i64 = 2;

/// Prefix for pools whose controller has no name.
pub const FALLBACK_POOL_NAME_PREFIX: &str = "Piscina";
