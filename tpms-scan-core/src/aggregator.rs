//! Wheel scan aggregation
//!
//! Reduces the ordered sequence of records captured during one wheel's scan
//! window into a [`WheelScanResult`]: the strongest-signal record, the
//! per-record description lines, and the collision flag.
//!
//! This is a pure reduction - no shared state, no ordering dependency between
//! wheels. A result is built once per window and never revisited.

use crate::types::{TelemetryRecord, WheelPosition};
use serde::Serialize;

/// Fixed marker line for a window in which nothing was heard
///
/// Distinct from any count-based message: the sensor at this position may be
/// faulty, unpaired, or have a dead battery.
pub const NO_SIGNAL: &str = "no signal";

/// Annotation appended to the strongest record's line when the window held
/// more than one record
pub const STRONGEST_MARK: &str = "[strongest signal]";

/// Aggregate over one wheel's scan window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelScanResult {
    /// The wheel position this window belongs to
    pub wheel: WheelPosition,
    /// Records in detection order (arrival order from capture)
    pub records: Vec<TelemetryRecord>,
    /// Id of the record with maximal signal strength (absent when the
    /// window was empty)
    pub strongest_id: Option<String>,
    /// True iff more than one record was decoded in this window
    pub has_collision: bool,
}

impl WheelScanResult {
    /// Description lines for this window, in detection order
    ///
    /// An empty window yields the single fixed [`NO_SIGNAL`] marker. With
    /// more than one record, the strongest record's line carries the
    /// [`STRONGEST_MARK`] annotation; a lone record is left unannotated.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.records.is_empty() {
            return vec![NO_SIGNAL.to_string()];
        }
        let annotate = self.records.len() > 1;
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let line = record.describe();
                if annotate && Some(index) == self.strongest_index() {
                    format!("{} {}", line, STRONGEST_MARK)
                } else {
                    line
                }
            })
            .collect()
    }

    /// Index of the strongest-signal record (first wins on exact ties)
    fn strongest_index(&self) -> Option<usize> {
        strongest(&self.records)
    }
}

/// Reduce one wheel's scan window to a [`WheelScanResult`]
///
/// The strongest record is selected by a linear scan with strict `>` on
/// `signal_strength`, so the earliest-arrival record wins exact ties.
/// The collision flag is set whenever more than one record was decoded,
/// whether or not the records look like duplicates - retransmissions from a
/// single noisy sensor are indistinguishable from cross-talk here, and the
/// flag errs toward warning the operator.
pub fn aggregate(wheel: WheelPosition, records: Vec<TelemetryRecord>) -> WheelScanResult {
    let strongest_id = strongest(&records).map(|index| records[index].id.clone());
    let has_collision = records.len() > 1;

    log::debug!(
        "{}: {} record(s), strongest {:?}, collision {}",
        wheel,
        records.len(),
        strongest_id,
        has_collision
    );

    WheelScanResult {
        wheel,
        records,
        strongest_id,
        has_collision,
    }
}

/// Index of the record with maximal signal strength, if any
///
/// Numeric comparison with strict `>`: the first record encountered wins
/// exact ties.
fn strongest(records: &[TelemetryRecord]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, record) in records.iter().enumerate() {
        match best {
            None => best = Some(index),
            Some(current) if record.signal_strength > records[current].signal_strength => {
                best = Some(index)
            }
            _ => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BatteryStatus;

    fn record(id: &str, rssi: f64) -> TelemetryRecord {
        TelemetryRecord {
            id: id.to_string(),
            model: None,
            signal_strength: rssi,
            pressure_kpa: None,
            battery: BatteryStatus::Unknown,
            time: None,
        }
    }

    #[test]
    fn test_two_records_strongest_annotated() {
        let result = aggregate(
            WheelPosition::FrontLeft,
            vec![record("A", -5.0), record("B", -2.0)],
        );

        assert_eq!(result.strongest_id.as_deref(), Some("B"));
        assert!(result.has_collision);

        let lines = result.summary_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("sensor A"));
        assert!(!lines[0].contains(STRONGEST_MARK));
        assert!(lines[1].contains("sensor B"));
        assert!(lines[1].contains(STRONGEST_MARK));
    }

    #[test]
    fn test_empty_window() {
        let result = aggregate(WheelPosition::Spare, vec![]);
        assert_eq!(result.strongest_id, None);
        assert!(!result.has_collision);
        assert_eq!(result.summary_lines(), vec![NO_SIGNAL.to_string()]);
    }

    #[test]
    fn test_single_record_not_annotated() {
        let mut single = record("A", -5.0);
        single.battery = BatteryStatus::Low;
        let result = aggregate(WheelPosition::BackRight, vec![single]);

        assert_eq!(result.strongest_id.as_deref(), Some("A"));
        assert!(!result.has_collision);

        let lines = result.summary_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("battery low"));
        assert!(!lines[0].contains(STRONGEST_MARK));
    }

    #[test]
    fn test_exact_tie_earliest_arrival_wins() {
        let result = aggregate(
            WheelPosition::BackLeft,
            vec![record("first", -6.0), record("second", -6.0)],
        );
        assert_eq!(result.strongest_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_comparison_is_numeric_not_textual() {
        // Lexically "-10.0" > "-9.5", numerically the opposite
        let result = aggregate(
            WheelPosition::FrontRight,
            vec![record("weak", -10.0), record("strong", -9.5)],
        );
        assert_eq!(result.strongest_id.as_deref(), Some("strong"));
    }

    #[test]
    fn test_lines_keep_arrival_order() {
        let result = aggregate(
            WheelPosition::FrontLeft,
            vec![record("C", -9.0), record("A", -1.0), record("B", -4.0)],
        );
        assert_eq!(result.strongest_id.as_deref(), Some("A"));

        let lines = result.summary_lines();
        assert!(lines[0].contains("sensor C"));
        assert!(lines[1].contains("sensor A"));
        assert!(lines[2].contains("sensor B"));
        let annotated: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(STRONGEST_MARK))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(annotated, vec![1]);
    }

    #[test]
    fn test_collision_iff_more_than_one_record() {
        for count in 0..4 {
            let records = (0..count)
                .map(|n| record(&format!("S{}", n), -(n as f64)))
                .collect();
            let result = aggregate(WheelPosition::Spare, records);
            assert_eq!(result.has_collision, count > 1, "count {}", count);
        }
    }

    #[test]
    fn test_duplicate_ids_still_flag_collision() {
        // Same physical sensor heard twice is indistinguishable from two
        // sensors, so the flag is raised either way.
        let result = aggregate(
            WheelPosition::FrontLeft,
            vec![record("A", -5.0), record("A", -5.1)],
        );
        assert!(result.has_collision);
        assert_eq!(result.strongest_id.as_deref(), Some("A"));
    }
}
