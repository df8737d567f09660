//! Core types for the TPMS scan library
//!
//! This module defines the types the library emits when processing decoded
//! sensor events. The library is stateless and only normalizes and aggregates
//! events - it does not drive the radio capture or render reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Sentinel used for a sensor id that could not be decoded
pub const UNKNOWN_ID: &str = "unknown";

/// kPa to PSI conversion factor
pub const KPA_TO_PSI: f64 = 0.14503;

/// One decoded sensor transmission, normalized from a raw capture event
///
/// Optional telemetry fields that were missing or undecodable in the raw
/// event carry their sentinel (`UNKNOWN_ID`, `None`, `BatteryStatus::Unknown`)
/// rather than failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    /// Sensor identifier, or `UNKNOWN_ID` if the event carried none.
    /// Numeric ids are rendered to their decimal string form.
    pub id: String,
    /// Sensor model name (if available)
    pub model: Option<String>,
    /// Received signal strength (dB-like scale, larger = stronger).
    /// Required: an event without it does not produce a record.
    pub signal_strength: f64,
    /// Tire pressure in kilopascals (if available)
    pub pressure_kpa: Option<f64>,
    /// Battery state reported by the sensor
    pub battery: BatteryStatus,
    /// Detection timestamp stamped by the capture tool (if available)
    pub time: Option<Timestamp>,
}

impl TelemetryRecord {
    /// Tire pressure in PSI, derived from kPa
    ///
    /// Only computed when a kPa reading is present.
    pub fn pressure_psi(&self) -> Option<f64> {
        self.pressure_kpa.map(|kpa| kpa * KPA_TO_PSI)
    }

    /// One human-readable description line for this record
    pub fn describe(&self) -> String {
        let model = self.model.as_deref().unwrap_or("unknown model");
        let pressure = match self.pressure_kpa {
            Some(kpa) => format!("{:.1} kPa ({:.1} PSI)", kpa, kpa * KPA_TO_PSI),
            None => "pressure unknown".to_string(),
        };
        format!(
            "sensor {} ({}), rssi {:.1} dB, {}, battery {}",
            self.id, model, self.signal_strength, pressure, self.battery
        )
    }
}

/// Battery state reported by a sensor
///
/// Total three-way classification of the raw battery flag: `1` maps to `Ok`,
/// `0` to `Low`, anything else (including absent) to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryStatus {
    Ok,
    Low,
    Unknown,
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryStatus::Ok => write!(f, "ok"),
            BatteryStatus::Low => write!(f, "low"),
            BatteryStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// The five wheel positions, in fixed presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelPosition {
    FrontLeft,
    BackLeft,
    BackRight,
    FrontRight,
    Spare,
}

impl WheelPosition {
    /// All positions in scan/presentation order
    pub const ALL: [WheelPosition; 5] = [
        WheelPosition::FrontLeft,
        WheelPosition::BackLeft,
        WheelPosition::BackRight,
        WheelPosition::FrontRight,
        WheelPosition::Spare,
    ];

    /// Human-readable label for prompts and report headings
    pub fn label(&self) -> &'static str {
        match self {
            WheelPosition::FrontLeft => "front left",
            WheelPosition::BackLeft => "back left",
            WheelPosition::BackRight => "back right",
            WheelPosition::FrontRight => "front right",
            WheelPosition::Spare => "spare",
        }
    }
}

impl fmt::Display for WheelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors that can occur while capturing or parsing sensor events
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The raw event is not a field mapping at all - an upstream framing
    /// problem, never substituted with sentinels.
    #[error("Malformed capture event: {0}")]
    MalformedEvent(String),

    /// The event carried no numeric rssi field; a record without signal
    /// strength is not usable.
    #[error("Capture event has no numeric rssi field")]
    MissingSignalStrength,

    /// The capture subprocess could not be run or exited abnormally
    #[error("Radio capture failed: {0}")]
    CaptureFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_psi_derivation() {
        let record = TelemetryRecord {
            id: "A1".to_string(),
            model: None,
            signal_strength: -7.0,
            pressure_kpa: Some(220.0),
            battery: BatteryStatus::Ok,
            time: None,
        };
        assert_eq!(record.pressure_psi(), Some(220.0 * 0.14503));

        let no_pressure = TelemetryRecord {
            pressure_kpa: None,
            ..record
        };
        assert_eq!(no_pressure.pressure_psi(), None);
    }

    #[test]
    fn test_wheel_presentation_order() {
        let labels: Vec<&str> = WheelPosition::ALL.iter().map(|w| w.label()).collect();
        assert_eq!(
            labels,
            vec!["front left", "back left", "back right", "front right", "spare"]
        );
    }

    #[test]
    fn test_battery_display() {
        assert_eq!(format!("{}", BatteryStatus::Ok), "ok");
        assert_eq!(format!("{}", BatteryStatus::Low), "low");
        assert_eq!(format!("{}", BatteryStatus::Unknown), "unknown");
    }

    #[test]
    fn test_describe_uses_sentinels() {
        let record = TelemetryRecord {
            id: UNKNOWN_ID.to_string(),
            model: None,
            signal_strength: -12.5,
            pressure_kpa: None,
            battery: BatteryStatus::Unknown,
            time: None,
        };
        let line = record.describe();
        assert!(line.contains("sensor unknown"));
        assert!(line.contains("unknown model"));
        assert!(line.contains("pressure unknown"));
        assert!(line.contains("battery unknown"));
    }
}
