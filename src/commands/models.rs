use crate::tracecmd::ReportSource;
use crate::utils::config::{
    FoldConfig, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_TRACE_CMD, FLAMEGRAPH_WIDTH,
};
use std::path::PathBuf;

/// Arguments for the fold command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FoldArgs {
    /// Where the report text comes from
    pub source: ReportSource,

    /// Output path for folded stacks
    pub output_folded: PathBuf,

    /// Target function, threshold and depth
    pub config: FoldConfig,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph title (defaults to "First <target> (<total>μs)")
    pub flamegraph_title: Option<String>,

    /// Flamegraph width in pixels
    pub flamegraph_width: usize,

    /// Output path for JSON stats report (optional)
    pub output_json: Option<PathBuf>,

    /// Print captured stacks and statistics to stdout
    pub print_summary: bool,
}

impl Default for FoldArgs {
    fn default() -> Self {
        Self {
            source: ReportSource::Capture {
                binary: DEFAULT_TRACE_CMD.to_string(),
                recording: PathBuf::from(DEFAULT_INPUT_FILE),
            },
            output_folded: PathBuf::from(DEFAULT_OUTPUT_FILE),
            config: FoldConfig::default(),
            output_svg: None,
            flamegraph_title: None,
            flamegraph_width: FLAMEGRAPH_WIDTH,
            output_json: None,
            print_summary: true,
        }
    }
}
