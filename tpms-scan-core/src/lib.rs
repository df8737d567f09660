//! TPMS Scan Library
//!
//! A stateless, reusable library for normalizing decoded tire-pressure sensor
//! events and aggregating them into per-wheel scan results.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the scan core:
//! - Parses raw decoded events (JSON objects from the radio capture tool)
//!   into structured telemetry records
//! - Reduces one wheel's scan window to a summary: strongest-signal record,
//!   annotated description lines, and a collision flag
//!
//! The library does NOT:
//! - Run or control the radio capture subprocess
//! - Prompt the operator or render the final report
//! - Demodulate RF or decode the sensor protocol
//!
//! All orchestration and presentation is in the application layer
//! (tpms-scan-cli).
//!
//! # Example Usage
//!
//! ```
//! use tpms_scan_core::{aggregate, parse_event, WheelPosition};
//!
//! let raw = serde_json::json!({
//!     "model": "Schrader", "id": "1A2B", "rssi": -7.2,
//!     "pressure_kPa": 221.5, "battery_ok": 1,
//! });
//! let record = parse_event(&raw).unwrap();
//!
//! let result = aggregate(WheelPosition::FrontLeft, vec![record]);
//! assert_eq!(result.strongest_id.as_deref(), Some("1A2B"));
//! assert!(!result.has_collision);
//! for line in result.summary_lines() {
//!     println!("{}", line);
//! }
//! ```

// Public modules
pub mod aggregator;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use aggregator::{aggregate, WheelScanResult, NO_SIGNAL, STRONGEST_MARK};
pub use parser::parse_event;
pub use types::{
    BatteryStatus, Result, ScanError, TelemetryRecord, Timestamp, WheelPosition, KPA_TO_PSI,
    UNKNOWN_ID,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
