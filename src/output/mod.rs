//! Output writers for folded stacks, reports and flamegraphs.
//!
//! This module handles writing data to disk in various formats:
//! - Folded stacks (the flamegraph input)
//! - JSON stats reports
//! - SVG flamegraphs

pub mod folded;
pub mod json;
pub mod schema;
pub mod svg;

// Re-export main functions
pub use folded::{format_duration, parse_folded, parse_folded_line, read_folded, render_folded, write_folded};
pub use json::{read_report, write_report};
pub use schema::{FoldReport, StackEntry};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
