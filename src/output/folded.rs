//! Folded stack output.
//!
//! Format: one sample per line, `frame1;frame2;...;frameN <duration>`,
//! sorted by path. This is what flamegraph.pl and inferno consume.

use super::validate_path;
use crate::aggregator::StackSampleTable;
use crate::utils::error::{FoldedParseError, OutputError};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Format a duration as a plain decimal
///
/// Integral values keep one decimal place (`2.0`), everything else uses
/// the shortest representation that reads back to the same value.
pub fn format_duration(duration_us: f64) -> String {
    if duration_us.fract() == 0.0 {
        format!("{:.1}", duration_us)
    } else {
        format!("{}", duration_us)
    }
}

/// Render the table as folded text
///
/// **Public** - used by `write_folded` and the flamegraph generator
///
/// Entries with a non-positive duration are left out.
pub fn render_folded(table: &StackSampleTable) -> String {
    table
        .iter()
        .filter(|(_, duration)| *duration > 0.0)
        .map(|(path, duration)| format!("{} {}\n", path, format_duration(duration)))
        .collect()
}

/// Write the table to a folded file
///
/// **Public** - main entry point for folded output
///
/// # Returns
/// Number of lines written
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_folded(
    table: &StackSampleTable,
    output_path: impl AsRef<Path>,
) -> Result<usize, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing folded stacks to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let folded = render_folded(table);
    let line_count = folded.lines().count();

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(folded.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Folded stacks written successfully ({} lines)", line_count);

    Ok(line_count)
}

/// Parse one folded line into path and duration
///
/// **Public** - used when reading folded files back
///
/// # Arguments
/// * `line` - A single non-empty folded line
/// * `line_number` - 1-based, for error messages
pub fn parse_folded_line(line: &str, line_number: usize) -> Result<(String, f64), FoldedParseError> {
    let malformed = |reason: &str| FoldedParseError::Malformed {
        line: line_number,
        reason: reason.to_string(),
    };

    let (path, duration) = line
        .trim_end()
        .rsplit_once(' ')
        .ok_or_else(|| malformed("missing duration"))?;

    if path.trim().is_empty() {
        return Err(malformed("empty stack path"));
    }

    let duration: f64 = duration
        .parse()
        .map_err(|_| malformed(&format!("invalid duration '{}'", duration)))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(malformed("duration must be positive"));
    }

    Ok((path.to_string(), duration))
}

/// Parse folded text back into a table
///
/// **Public** - inverse of `render_folded`; blank lines are skipped
pub fn parse_folded<R: BufRead>(reader: R) -> Result<StackSampleTable, FoldedParseError> {
    let mut table = StackSampleTable::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (path, duration) = parse_folded_line(&line, index + 1)?;
        table.insert_folded(path, duration);
    }

    Ok(table)
}

/// Read a folded file from disk
///
/// **Public** - used by the validate command
pub fn read_folded(input_path: impl AsRef<Path>) -> Result<StackSampleTable, FoldedParseError> {
    let input_path = input_path.as_ref();

    debug!("Reading folded stacks from: {}", input_path.display());

    let file = File::open(input_path)?;
    parse_folded(BufReader::new(file))
}
