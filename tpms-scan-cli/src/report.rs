//! Report generation
//!
//! Renders the consolidated scan report, either as operator-facing text or
//! as JSON for downstream tooling.

use crate::scan::{ScanReport, WheelOutcome};
use anyhow::Result;
use chrono::Utc;

/// Per-wheel notice when the window held more than one decoded event
const COLLISION_NOTICE: &str = "warning: more than one sensor heard at this position";

/// Global advice printed when any wheel collided
const TUNING_WARNING: &str = "One or more positions picked up multiple sensors. Move the \
antenna closer to the target wheel or reduce receiver gain, then rescan the flagged positions.";

/// Render the operator-facing text report
pub fn render_text(report: &ScanReport) -> String {
    let mut lines = vec![
        "═══════════════════════════════════════════════".to_string(),
        "  TPMS Scan Report".to_string(),
        format!("  {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        "═══════════════════════════════════════════════".to_string(),
    ];

    for outcome in &report.outcomes {
        lines.push(String::new());
        lines.push(format!("{}:", outcome.wheel()));
        match outcome {
            WheelOutcome::Scanned(result) => {
                for line in result.summary_lines() {
                    lines.push(format!("  {}", line));
                }
                if result.has_collision {
                    lines.push(format!("  {}", COLLISION_NOTICE));
                }
            }
            WheelOutcome::Failed { reason, .. } => {
                lines.push(format!("  scan failed: {}", reason));
            }
        }
    }

    if report.any_collision() {
        lines.push(String::new());
        lines.push(format!("⚠ {}", TUNING_WARNING));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
