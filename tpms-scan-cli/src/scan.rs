//! Scan driver
//!
//! Walks the wheel positions strictly sequentially (only one antenna position
//! is valid at a time), captures one window per wheel, and reduces each to a
//! [`WheelScanResult`]. A hard capture or parse error at one wheel is
//! recorded and the remaining wheels still scan.

use crate::capture::CaptureSource;
use serde::Serialize;
use tpms_scan_core::{aggregate, parse_event, WheelPosition, WheelScanResult};

/// What one wheel's scan window produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum WheelOutcome {
    /// The window completed; the result may still hold zero records
    Scanned(WheelScanResult),
    /// The window could not be captured or its events could not be parsed.
    /// Distinct from an empty window.
    Failed {
        wheel: WheelPosition,
        reason: String,
    },
}

impl WheelOutcome {
    pub fn wheel(&self) -> WheelPosition {
        match self {
            WheelOutcome::Scanned(result) => result.wheel,
            WheelOutcome::Failed { wheel, .. } => *wheel,
        }
    }

    fn has_collision(&self) -> bool {
        match self {
            WheelOutcome::Scanned(result) => result.has_collision,
            WheelOutcome::Failed { .. } => false,
        }
    }
}

/// Consolidated result of one full scan run, in wheel presentation order
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub outcomes: Vec<WheelOutcome>,
}

impl ScanReport {
    /// True iff any wheel's window held more than one decoded event
    pub fn any_collision(&self) -> bool {
        self.outcomes.iter().any(WheelOutcome::has_collision)
    }
}

/// Run one full scan over the given wheel positions
///
/// `before_window` runs before each wheel's capture (operator prompt). Wheels
/// are processed strictly sequentially; a failure at one wheel is isolated
/// into its [`WheelOutcome`] and does not abort the rest of the run.
pub fn run_scan<S, F>(source: &mut S, wheels: &[WheelPosition], mut before_window: F) -> ScanReport
where
    S: CaptureSource + ?Sized,
    F: FnMut(WheelPosition),
{
    let mut outcomes = Vec::with_capacity(wheels.len());

    for &wheel in wheels {
        before_window(wheel);
        outcomes.push(scan_wheel(source, wheel));
    }

    ScanReport { outcomes }
}

fn scan_wheel<S: CaptureSource + ?Sized>(source: &mut S, wheel: WheelPosition) -> WheelOutcome {
    let raw_events = match source.capture_window(wheel) {
        Ok(events) => events,
        Err(e) => {
            log::error!("{}: capture failed: {}", wheel, e);
            return WheelOutcome::Failed {
                wheel,
                reason: e.to_string(),
            };
        }
    };

    let mut records = Vec::with_capacity(raw_events.len());
    for raw in &raw_events {
        match parse_event(raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::error!("{}: unparsable event: {}", wheel, e);
                return WheelOutcome::Failed {
                    wheel,
                    reason: e.to_string(),
                };
            }
        }
    }

    WheelOutcome::Scanned(aggregate(wheel, records))
}
