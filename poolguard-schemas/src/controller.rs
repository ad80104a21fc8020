//! Controller Snapshot Schema
//!
//! Shape of the backend's controller payload. Keys follow the backend's
//! database columns (PascalCase) except the nested `sensors` list.
//!
//! Two envelopes carry controllers:
//!
//! ```json
//! { "controllers": [ ... ] }                                   // refresh
//! { "exists": true, "token": "...", "data": {
//!     "user": { ... }, "controllers": [ ... ] } }              // login
//! ```
//!
//! Both parse into the same [`ControllerSnapshot`].

use poolguard_core::constants::sensors::{
    STATUS_CODE_CONNECTED, STATUS_CODE_DISCONNECTED, STATUS_CODE_UNASSOCIATED, STATUS_CONNECTED,
    STATUS_DISCONNECTED, STATUS_UNASSOCIATED,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::SchemaError;

/// Controllers visible to one account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Controllers in backend order
    #[serde(default)]
    pub controllers: Vec<Controller>,
}

/// Payload envelopes the backend wraps controllers in
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Refresh { controllers: Vec<Controller> },
    Login { data: ControllerSnapshot },
}

impl ControllerSnapshot {
    /// Parse a refresh or login payload
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let envelope: Envelope =
            serde_json::from_str(json).map_err(|e| SchemaError::ParseError(e.to_string()))?;

        let snapshot = match envelope {
            Envelope::Refresh { controllers } => Self { controllers },
            Envelope::Login { data } => data,
        };

        log::debug!("Parsed snapshot with {} controllers", snapshot.controllers.len());
        Ok(snapshot)
    }
}

/// One pool controller and its sensors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Controller {
    /// Controller id, numeric or text depending on firmware
    #[serde(deserialize_with = "id_as_string")]
    pub ctrl_id: String,

    /// User-facing name
    #[serde(default)]
    pub ctrl_name: Option<String>,

    /// Link status
    #[serde(default)]
    pub status: ControllerStatus,

    /// Pool volume (liters)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume: Option<f64>,

    /// Sensors with their latest values
    #[serde(rename = "sensors", default)]
    pub sensors: Vec<Sensor>,
}

impl Controller {
    /// First sensor with the given name
    pub fn sensor(&self, name: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|sensor| sensor.sensor_name == name)
    }
}

/// One sensor and its latest value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sensor {
    /// Sensor id within the controller
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sensor_id: Option<f64>,

    /// Sensor name as configured on the controller
    #[serde(default)]
    pub sensor_name: String,

    /// Latest value, `None` when never reported
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,

    /// Upper threshold, doubles as the pH set point
    #[serde(default, deserialize_with = "lenient_f64")]
    pub upper_th: Option<f64>,

    /// Sensor status code; 0 is the normal state
    #[serde(default, deserialize_with = "lenient_f64")]
    pub status: Option<f64>,
}

/// Controller link status
///
/// Serializes back to the backend's labels so a snapshot can be cached and
/// parsed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ControllerStatus {
    /// No longer linked to the account
    #[serde(rename = "Desasociado")]
    Unassociated,
    /// Online
    #[serde(rename = "Conectado")]
    Connected,
    /// Offline
    #[serde(rename = "Desconectado")]
    Disconnected,
    /// Missing or unrecognised
    #[default]
    Unknown,
}

impl ControllerStatus {
    /// Map a backend label
    pub fn from_label(label: &str) -> Self {
        match label {
            STATUS_UNASSOCIATED => Self::Unassociated,
            STATUS_CONNECTED => Self::Connected,
            STATUS_DISCONNECTED => Self::Disconnected,
            _ => Self::Unknown,
        }
    }

    /// Map a raw status code
    pub fn from_code(code: i64) -> Self {
        match code {
            STATUS_CODE_UNASSOCIATED => Self::Unassociated,
            STATUS_CODE_CONNECTED => Self::Connected,
            STATUS_CODE_DISCONNECTED => Self::Disconnected,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ControllerStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let status = match Value::deserialize(deserializer)? {
            Value::String(label) => Self::from_label(label.trim()),
            Value::Number(n) => n.as_i64().map_or(Self::Unknown, Self::from_code),
            _ => Self::Unknown,
        };
        Ok(status)
    }
}

/// Number, numeric string or null; anything unparsable reads as `None`
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(text) => Ok(text),
        other => Err(D::Error::custom(format!("invalid controller id: {}", other))),
    }
}
