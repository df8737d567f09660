//! Operator prompts
//!
//! Guides the operator through the antenna positions. Prompts go to stderr so
//! a JSON report on stdout stays machine-readable.

use std::io::{self, BufRead, Write};
use tpms_scan_core::WheelPosition;

/// Prompt text shown before one wheel's scan window
pub fn window_instructions(wheel: WheelPosition, window_secs: u64) -> String {
    format!(
        "Hold the antenna near the {} wheel sensor, then press Enter.\n\
         Listening for {} seconds once started...",
        wheel, window_secs
    )
}

/// Block until the operator confirms the antenna is in position
pub fn wait_for_operator(wheel: WheelPosition, window_secs: u64) {
    eprintln!();
    eprintln!("{}", window_instructions(wheel, window_secs));
    let _ = io::stderr().flush();

    let mut line = String::new();
    // EOF (e.g. piped stdin) just proceeds; the scan is still useful
    let _ = io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_the_wheel() {
        let text = window_instructions(WheelPosition::BackRight, 30);
        assert!(text.contains("back right"));
        assert!(text.contains("30 seconds"));
    }
}
