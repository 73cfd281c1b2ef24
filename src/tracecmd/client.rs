//! Runner for the trace-cmd binary.
//!
//! `trace-cmd report <trace.dat>` renders a recording as text. We only ever
//! consume that text; the binary recording format is trace-cmd's business.

use crate::utils::config::DEFAULT_TRACE_CMD;
use crate::utils::error::CaptureError;
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Handle on the trace-cmd binary
pub struct TraceCmd {
    binary: String,
}

impl Default for TraceCmd {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CMD)
    }
}

impl TraceCmd {
    /// Create a runner for the given binary name or path
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Render a recording as report text
    ///
    /// # Errors
    /// * `CaptureError::ToolUnavailable` - the binary could not be started
    /// * `CaptureError::ToolFailed` - it exited unsuccessfully
    /// * `CaptureError::InvalidUtf8` - stdout was not UTF-8
    pub fn report(&self, trace_file: &Path) -> Result<String, CaptureError> {
        info!("Running {} report {}", self.binary, trace_file.display());

        let output = Command::new(&self.binary)
            .arg("report")
            .arg(trace_file)
            .output()
            .map_err(|source| CaptureError::ToolUnavailable {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CaptureError::ToolFailed {
                binary: self.binary.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("{} produced {} bytes of report text", self.binary, output.stdout.len());

        Ok(String::from_utf8(output.stdout)?)
    }
}
