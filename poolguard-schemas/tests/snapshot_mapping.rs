//! End-to-end mapping of backend payloads into pool status records
//!
//! Uses payloads shaped like the backend's refresh and login responses,
//! including the quirks field controllers produce (numeric strings, null
//! values, raw status codes, missing sensors).

use poolguard_core::{Band, ChlorineEstimate, TemperatureBand};
use poolguard_schemas::{ControllerSnapshot, MappingConfig, PoolMapper, SchemaError};

const REFRESH_PAYLOAD: &str = r#"{
  "controllers": [
    {
      "CtrlId": 101,
      "CtrlName": "Piscina Principal",
      "Status": "Conectado",
      "Model": "Pool Xpert R2",
      "Volume": 120000,
      "sensors": [
        {"SensorId": 1, "SensorName": "pH", "Value": 7.2, "UpperTh": 7.4, "BottomTh": 7.0, "Status": 0},
        {"SensorId": 2, "SensorName": "Cloro libre", "Value": 720, "UpperTh": 750, "Status": 0},
        {"SensorId": 3, "SensorName": "Temperatura", "Value": "28.0", "Status": 0},
        {"SensorId": 4, "SensorName": "Flujo", "Value": null, "Status": 0}
      ]
    },
    {
      "CtrlId": 102,
      "CtrlName": "Piscina Vieja",
      "Status": "Desasociado",
      "sensors": []
    },
    {
      "CtrlId": 103,
      "CtrlName": "",
      "Status": 2,
      "Volume": "45000",
      "sensors": [
        {"SensorId": 1, "SensorName": "pH", "Value": 7.5},
        {"SensorId": 2, "SensorName": "Cloro libre", "Value": null},
        {"SensorId": 4, "SensorName": "Flujo", "Status": 1}
      ]
    },
    {
      "CtrlId": 104,
      "CtrlName": "Spa",
      "Status": "Conectado",
      "Volume": 25000,
      "sensors": [
        {"SensorId": 1, "SensorName": "pH", "Value": 7.3},
        {"SensorId": 2, "SensorName": "Cloro libre", "Value": 990},
        {"SensorId": 3, "SensorName": "Temperatura", "Value": 35}
      ]
    }
  ]
}"#;

#[test]
fn refresh_payload_maps_associated_pools() {
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    assert_eq!(snapshot.controllers.len(), 4);

    let pools = PoolMapper::default().map_snapshot(&snapshot);
    let ids: Vec<&str> = pools.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["101", "103", "104"]);
}

#[test]
fn healthy_pool() {
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    let pools = PoolMapper::default().map_snapshot(&snapshot);
    let main = &pools[0];

    assert_eq!(main.name, "Piscina Principal");
    assert_eq!(main.ph, 7.2);
    assert_eq!(main.target_ph, Some(7.4));
    assert_eq!(main.orp_mv, 720.0);
    assert_eq!(main.temperature_c, 28.0);
    assert_eq!(main.volume_liters, 120000.0);
    assert!(main.online);
    assert!(main.has_flow);
    assert!(!main.acid_tank_low && !main.chlorine_tank_low);

    // pH 7.2 curve: 705 -> 1.0, 792 -> 2.0; 720 mV is 15/87 of the way
    assert_eq!(main.chlorine_ppm, 1.2);
    assert_eq!(
        main.chlorine,
        ChlorineEstimate::Interpolated { ppm: 1.2, anchor_ph: 7.2 }
    );
    assert_eq!(main.ph_band, Some(Band::Optimal));
    assert_eq!(main.chlorine_band, Some(Band::Optimal));
    assert_eq!(main.temperature_band, Some(TemperatureBand::Warm));
}

#[test]
fn offline_pool_without_orp() {
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    let pools = PoolMapper::default().map_snapshot(&snapshot);
    let pool = &pools[1];

    assert_eq!(pool.name, "Piscina 103");
    assert!(!pool.online);
    assert!(!pool.has_flow);
    assert_eq!(pool.volume_liters, 45000.0);
    assert_eq!(pool.target_ph, None);
    assert_eq!(pool.chlorine, ChlorineEstimate::NoSignal);
    assert_eq!(pool.chlorine_ppm, 0.0);
    assert_eq!(pool.chlorine_band, None);
    assert_eq!(pool.ph_band, Some(Band::Optimal));
    assert_eq!(pool.temperature_band, None);
}

#[test]
fn saturated_spa() {
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    let pools = PoolMapper::default().map_snapshot(&snapshot);
    let spa = &pools[2];

    assert_eq!(spa.chlorine, ChlorineEstimate::Saturated);
    assert_eq!(spa.chlorine_ppm, 5.0);
    assert_eq!(spa.chlorine_band, Some(Band::Critical));
    assert_eq!(spa.temperature_band, Some(TemperatureBand::Hot));
    // No flow switch reported: treated as flowing
    assert!(spa.has_flow);
}

#[test]
fn login_payload_carries_same_controllers() {
    let login = format!(
        r#"{{"exists": true, "message": "ok", "token": "t0k3n",
            "data": {{"user": {{"UserId": 7, "Email": "ops@example.com"}}, {}}}}}"#,
        &REFRESH_PAYLOAD.trim()[1..REFRESH_PAYLOAD.trim().len() - 1]
    );

    let from_login = ControllerSnapshot::from_json(&login).unwrap();
    let from_refresh = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    assert_eq!(from_login, from_refresh);
}

#[test]
fn pool_status_serializes_for_display() {
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    let pools = PoolMapper::default().map_snapshot(&snapshot);

    let json = serde_json::to_value(&pools[0]).unwrap();
    assert_eq!(json["chlorine_ppm"], 1.2);
    assert_eq!(json["chlorine"]["kind"], "interpolated");
    assert_eq!(json["ph_band"], "optimal");
    assert_eq!(json["temperature_band"], "warm");

    let json = serde_json::to_value(&pools[1]).unwrap();
    assert_eq!(json["chlorine"]["kind"], "no_signal");
    assert!(json["chlorine_band"].is_null());
}

#[test]
fn custom_config_from_json() {
    let config = MappingConfig::from_json(
        r#"{"fallback_name_prefix": "Pool", "thresholds": {"temperature": {"warm_from_c": 20.0, "hot_from_c": 26.0}}}"#,
    )
    .unwrap();
    let snapshot = ControllerSnapshot::from_json(REFRESH_PAYLOAD).unwrap();
    let pools = PoolMapper::new(config).map_snapshot(&snapshot);

    assert_eq!(pools[0].temperature_band, Some(TemperatureBand::Hot));
    assert_eq!(pools[1].name, "Pool 103");
}

#[test]
fn malformed_payload_is_an_error() {
    let result = ControllerSnapshot::from_json(r#"{"controllers": "nope"}"#);
    assert!(matches!(result, Err(SchemaError::ParseError(_))));
}
