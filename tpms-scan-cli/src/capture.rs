//! Radio capture boundary
//!
//! The scan driver consumes decoded sensor events through the
//! [`CaptureSource`] trait; [`Rtl433Capture`] is the production
//! implementation, spawning the `rtl_433` demodulator for a fixed-duration
//! window and collecting one JSON event per stdout line. Tests substitute a
//! mock source.

use crate::config::{RadioConfig, ScanConfig};
use serde_json::Value;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;
use tpms_scan_core::{Result, ScanError, WheelPosition};

/// Source of decoded sensor events for one wheel's scan window
///
/// One call = one complete, blocking scan window. Demodulation, protocol
/// decoding and the window timeout all live behind this boundary.
pub trait CaptureSource {
    /// Capture one fixed-duration window and return the decoded events in
    /// arrival order
    fn capture_window(&mut self, wheel: WheelPosition) -> Result<Vec<Value>>;
}

/// Captures decoded events by running the rtl_433 demodulator
pub struct Rtl433Capture {
    radio: RadioConfig,
    window_secs: u64,
}

impl Rtl433Capture {
    pub fn new(radio: RadioConfig, scan: &ScanConfig) -> Self {
        Self {
            radio,
            window_secs: scan.window_secs,
        }
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(&self.radio.rtl433_bin);
        command
            .arg("-f")
            .arg(self.radio.frequency_hz.to_string())
            .arg("-F")
            .arg("json")
            .arg("-T")
            .arg(self.window_secs.to_string())
            .args(&self.radio.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl CaptureSource for Rtl433Capture {
    fn capture_window(&mut self, wheel: WheelPosition) -> Result<Vec<Value>> {
        log::info!(
            "Capturing {} for {}s at {} Hz",
            wheel,
            self.window_secs,
            self.radio.frequency_hz
        );

        let mut child = self.build_command().spawn().map_err(|e| {
            ScanError::CaptureFailed(format!(
                "could not spawn {}: {}",
                self.radio.rtl433_bin, e
            ))
        })?;

        // stdout is one JSON object per decoded transmission
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScanError::CaptureFailed("no stdout pipe".to_string()))?;

        // Drain stderr on its own thread: a chatty child (e.g. rtl_433 -v)
        // can fill the stderr pipe buffer and block before it ever closes
        // stdout, stalling the window.
        let stderr_thread = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut diagnostics = String::new();
                let _ = stderr.read_to_string(&mut diagnostics);
                diagnostics
            })
        });

        let mut events = Vec::new();
        let mut framing_error = None;
        for line in BufReader::new(stdout).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(&line) {
                Ok(event) => {
                    log::debug!("{}: decoded event: {}", wheel, event);
                    events.push(event);
                }
                Err(e) => {
                    // Upstream framing problem, not an empty window. Keep
                    // draining the pipe so the child can exit, then surface
                    // the first error.
                    if framing_error.is_none() {
                        framing_error =
                            Some(ScanError::MalformedEvent(format!("{}: {}", e, line)));
                    }
                }
            }
        }

        if let Some(handle) = stderr_thread {
            if let Ok(diagnostics) = handle.join() {
                if !diagnostics.is_empty() {
                    log::debug!("rtl_433 stderr: {}", diagnostics.trim_end());
                }
            }
        }

        let status = child.wait()?;
        if let Some(error) = framing_error {
            return Err(error);
        }
        if !status.success() {
            return Err(ScanError::CaptureFailed(format!(
                "{} exited with {}",
                self.radio.rtl433_bin, status
            )));
        }

        log::info!("{}: window closed, {} event(s)", wheel, events.len());
        Ok(events)
    }
}
