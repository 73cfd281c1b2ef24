//! SVG flamegraph generation using inferno.
//!
//! inferno parses sample counts as integers, so microsecond durations are
//! handed over as whole nanoseconds and scaled back for display with
//! `factor`.

use crate::aggregator::{FoldStats, StackSampleTable};
use crate::utils::config::{
    FoldConfig, FLAMEGRAPH_COUNT_NAME, FLAMEGRAPH_HEIGHT, FLAMEGRAPH_MIN_WIDTH, FLAMEGRAPH_WIDTH,
};
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::info;
use std::path::Path;

const NANOS_PER_MICRO: f64 = 1_000.0;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub min_width: f64,
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Function Graph".to_string(),
            width: FLAMEGRAPH_WIDTH,
            min_width: FLAMEGRAPH_MIN_WIDTH,
            count_name: FLAMEGRAPH_COUNT_NAME.to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `First <target> (<total>μs)`
    pub fn for_target(target_function: &str, stats: &FoldStats) -> Self {
        Self::new().with_title(first_call_title(target_function, stats))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

fn first_call_title(target_function: &str, stats: &FoldStats) -> String {
    format!("First {} ({:.0}μs)", target_function, stats.max_duration_us)
}

/// Generate SVG flamegraph from a stack table
///
/// **Public** - main entry point for in-process rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - nothing with a positive duration
/// * `FlamegraphError::GenerationFailed` - inferno failed to render
/// * `FlamegraphError::IoError` - rendered SVG was not UTF-8
pub fn generate_flamegraph(
    table: &StackSampleTable,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    let config = config.cloned().unwrap_or_default();

    let lines: Vec<String> = table
        .iter()
        .filter_map(|(path, duration)| {
            let nanos = (duration * NANOS_PER_MICRO).round();
            (nanos >= 1.0).then(|| format!("{} {}", path, nanos as u64))
        })
        .collect();

    if lines.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    info!("Generating flamegraph with {} stacks", lines.len());

    let mut options = Options::default();
    options.title = config.title.clone();
    options.count_name = config.count_name.clone();
    options.min_width = config.min_width;
    options.image_width = Some(config.width);
    options.factor = 1.0 / NANOS_PER_MICRO;

    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());

    String::from_utf8(svg)
        .map_err(|e| FlamegraphError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// The flamegraph.pl command line for rendering the folded file externally
pub fn flamegraph_command_hint(config: &FoldConfig, stats: &FoldStats, folded_path: &Path) -> String {
    format!(
        "flamegraph.pl --width {} --height {} --minwidth {} --title '{}' --countname '{}' {} > flamegraph.svg",
        FLAMEGRAPH_WIDTH,
        FLAMEGRAPH_HEIGHT,
        FLAMEGRAPH_MIN_WIDTH,
        first_call_title(&config.target_function, stats),
        FLAMEGRAPH_COUNT_NAME,
        folded_path.display()
    )
}

/// Console summary of the captured call
///
/// Lists every stack in path order with its duration, then the statistics.
pub fn generate_text_summary(table: &StackSampleTable, stats: &FoldStats) -> String {
    let mut lines = Vec::with_capacity(table.len() + 6);

    lines.push("Stack traces to be graphed:".to_string());
    for (path, duration) in table.iter() {
        lines.push(format!("{}: {:.2}μs", path, duration));
    }

    lines.push(String::new());
    lines.push("First instance statistics:".to_string());
    lines.push(format!("- Total time: {:.2}μs", stats.max_duration_us));
    lines.push(format!("- Maximum stack depth: {}", stats.max_depth));
    lines.push(format!("- Number of unique stacks: {}", stats.total_entries));

    lines.join("\n")
}
