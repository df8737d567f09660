//! Telemetry event parser
//!
//! Normalizes one raw decoded event (a JSON object emitted by the radio
//! capture tool, one per transmission) into a [`TelemetryRecord`].
//!
//! Extraction is defensive: a missing or wrongly-typed optional field yields
//! that field's sentinel, so a partially-decoded transmission still produces
//! a usable record. Only two conditions are hard errors: an event that is not
//! a field mapping at all, and an event without a numeric `rssi` value.

use crate::types::{BatteryStatus, Result, ScanError, TelemetryRecord, Timestamp, UNKNOWN_ID};
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Parse one raw capture event into a normalized record
///
/// # Arguments
/// * `raw` - One decoded event as emitted by the capture tool
///
/// # Returns
/// * `Ok(TelemetryRecord)` - best-effort record, sentinels for missing fields
/// * `Err(ScanError::MalformedEvent)` - input is not a JSON object
/// * `Err(ScanError::MissingSignalStrength)` - no numeric `rssi` field
pub fn parse_event(raw: &Value) -> Result<TelemetryRecord> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ScanError::MalformedEvent(raw.to_string()))?;

    let signal_strength = fields
        .get("rssi")
        .and_then(Value::as_f64)
        .ok_or(ScanError::MissingSignalStrength)?;

    Ok(TelemetryRecord {
        id: extract_id(fields.get("id")),
        model: extract_string(fields.get("model")),
        signal_strength,
        pressure_kpa: fields.get("pressure_kPa").and_then(Value::as_f64),
        battery: extract_battery(fields.get("battery_ok")),
        time: fields
            .get("time")
            .and_then(Value::as_str)
            .and_then(parse_event_time),
    })
}

/// Extract the sensor id, rendering numeric ids to decimal strings
fn extract_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNKNOWN_ID.to_string(),
    }
}

fn extract_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Total classification of the raw battery flag
///
/// Flag `1` (or `true`) means the battery is ok, `0` (or `false`) means low,
/// and any other value - including an absent flag - is unknown.
fn extract_battery(value: Option<&Value>) -> BatteryStatus {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => BatteryStatus::Ok,
            Some(0) => BatteryStatus::Low,
            _ => BatteryStatus::Unknown,
        },
        Some(Value::Bool(true)) => BatteryStatus::Ok,
        Some(Value::Bool(false)) => BatteryStatus::Low,
        _ => BatteryStatus::Unknown,
    }
}

/// Parse the capture tool's local timestamp ("%Y-%m-%d %H:%M:%S")
fn parse_event_time(text: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_event() {
        let raw = json!({
            "time": "2024-03-02 14:07:33",
            "model": "Schrader",
            "id": "1A2B3C",
            "rssi": -7.2,
            "pressure_kPa": 221.5,
            "battery_ok": 1,
        });
        let record = parse_event(&raw).unwrap();
        assert_eq!(record.id, "1A2B3C");
        assert_eq!(record.model.as_deref(), Some("Schrader"));
        assert_eq!(record.signal_strength, -7.2);
        assert_eq!(record.pressure_kpa, Some(221.5));
        assert_eq!(record.battery, BatteryStatus::Ok);
        assert!(record.time.is_some());
    }

    #[test]
    fn test_missing_optional_fields_use_sentinels() {
        let raw = json!({ "rssi": -15.0 });
        let record = parse_event(&raw).unwrap();
        assert_eq!(record.id, UNKNOWN_ID);
        assert_eq!(record.model, None);
        assert_eq!(record.pressure_kpa, None);
        assert_eq!(record.battery, BatteryStatus::Unknown);
        assert_eq!(record.time, None);
    }

    #[test]
    fn test_numeric_id_rendered_as_string() {
        let raw = json!({ "id": 158392, "rssi": -4.0 });
        let record = parse_event(&raw).unwrap();
        assert_eq!(record.id, "158392");
    }

    #[test]
    fn test_battery_classification_is_total() {
        let ok = json!({ "rssi": -1.0, "battery_ok": 1 });
        assert_eq!(parse_event(&ok).unwrap().battery, BatteryStatus::Ok);

        let low = json!({ "rssi": -1.0, "battery_ok": 0 });
        assert_eq!(parse_event(&low).unwrap().battery, BatteryStatus::Low);

        let odd = json!({ "rssi": -1.0, "battery_ok": 7 });
        assert_eq!(parse_event(&odd).unwrap().battery, BatteryStatus::Unknown);

        let text = json!({ "rssi": -1.0, "battery_ok": "yes" });
        assert_eq!(parse_event(&text).unwrap().battery, BatteryStatus::Unknown);

        let truthy = json!({ "rssi": -1.0, "battery_ok": true });
        assert_eq!(parse_event(&truthy).unwrap().battery, BatteryStatus::Ok);

        let falsy = json!({ "rssi": -1.0, "battery_ok": false });
        assert_eq!(parse_event(&falsy).unwrap().battery, BatteryStatus::Low);

        let absent = json!({ "rssi": -1.0 });
        assert_eq!(parse_event(&absent).unwrap().battery, BatteryStatus::Unknown);
    }

    #[test]
    fn test_type_mismatch_falls_back_to_sentinel() {
        let raw = json!({
            "rssi": -3.3,
            "model": 42,
            "pressure_kPa": "high",
            "time": 1234,
        });
        let record = parse_event(&raw).unwrap();
        assert_eq!(record.model, None);
        assert_eq!(record.pressure_kpa, None);
        assert_eq!(record.time, None);
    }

    #[test]
    fn test_missing_rssi_is_a_hard_error() {
        let raw = json!({ "id": "A", "model": "Schrader" });
        match parse_event(&raw) {
            Err(ScanError::MissingSignalStrength) => {}
            other => panic!("expected MissingSignalStrength, got {:?}", other),
        }

        let textual = json!({ "id": "A", "rssi": "-5" });
        assert!(matches!(
            parse_event(&textual),
            Err(ScanError::MissingSignalStrength)
        ));
    }

    #[test]
    fn test_non_object_event_is_malformed() {
        for raw in [json!("garbage"), json!(42), json!([1, 2, 3]), json!(null)] {
            assert!(matches!(
                parse_event(&raw),
                Err(ScanError::MalformedEvent(_))
            ));
        }
    }

    #[test]
    fn test_integer_rssi_accepted() {
        let raw = json!({ "id": "A", "rssi": -9 });
        assert_eq!(parse_event(&raw).unwrap().signal_strength, -9.0);
    }
}
