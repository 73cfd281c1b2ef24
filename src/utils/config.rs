//! Configuration and constants for the CLI.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Current stats report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Samples shorter than this are dropped (microseconds)
pub const DEFAULT_MIN_DURATION_US: f64 = 0.1;

/// Deepest call path tracked below (and including) the target function
pub const DEFAULT_MAX_STACK_DEPTH: usize = 5;

/// Root function whose first completed call is captured
pub const DEFAULT_TARGET_FUNCTION: &str = "do_mas_munmap";

pub const DEFAULT_INPUT_FILE: &str = "trace.dat";
pub const DEFAULT_OUTPUT_FILE: &str = "output.folded";

/// Binary invoked to render a trace.dat recording as text
pub const DEFAULT_TRACE_CMD: &str = "trace-cmd";

/// Separator between frames of a folded path
pub const FRAME_SEPARATOR: &str = ";";

// Keywords trace-cmd prints in front of function_graph events
pub const ENTRY_MARKER: &str = "funcgraph_entry:";
pub const EXIT_MARKER: &str = "funcgraph_exit:";

// Report header lines that never carry events
pub const HEADER_PREFIXES: &[&str] = &["CPU", "cpus="];

// Options mirrored from the suggested flamegraph.pl invocation
pub const FLAMEGRAPH_WIDTH: usize = 800;
pub const FLAMEGRAPH_HEIGHT: usize = 400;
pub const FLAMEGRAPH_MIN_WIDTH: f64 = 0.5;
pub const FLAMEGRAPH_COUNT_NAME: &str = "microseconds";

/// Settings fixed for one fold run.
///
/// Built once from the CLI and handed to the state machine, which never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Minimum exit duration for a sample to be kept
    pub min_duration_us: f64,

    /// Maximum number of frames in a captured path (>= 1)
    pub max_stack_depth: usize,

    /// Function whose first completed occurrence is captured
    pub target_function: String,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            min_duration_us: DEFAULT_MIN_DURATION_US,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            target_function: DEFAULT_TARGET_FUNCTION.to_string(),
        }
    }
}

impl FoldConfig {
    pub fn new(target_function: impl Into<String>) -> Self {
        Self {
            target_function: target_function.into(),
            ..Self::default()
        }
    }

    pub fn with_min_duration(mut self, min_duration_us: f64) -> Self {
        self.min_duration_us = min_duration_us;
        self
    }

    pub fn with_max_depth(mut self, max_stack_depth: usize) -> Self {
        self.max_stack_depth = max_stack_depth;
        self
    }

    /// Reject settings the state machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stack_depth == 0 {
            return Err(ConfigError::InvalidDepth(self.max_stack_depth));
        }

        if !self.min_duration_us.is_finite() || self.min_duration_us < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.min_duration_us));
        }

        if self.target_function.trim().is_empty() {
            return Err(ConfigError::EmptyTarget);
        }

        Ok(())
    }
}
