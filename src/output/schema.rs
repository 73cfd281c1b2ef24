//! JSON schema for the optional stats report.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{FoldStats, StackSampleTable};
use crate::utils::config::{FoldConfig, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Settings the stacks were folded with
    pub config: FoldConfig,

    /// Summary statistics
    pub stats: FoldStats,

    /// Captured stacks, sorted by path
    pub stacks: Vec<StackEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// A captured stack with its duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Folded path (e.g., "do_mas_munmap;unmap_region;free_pgtables")
    pub stack: String,

    pub duration_us: f64,
}

impl FoldReport {
    /// Build a report for a finished fold run
    ///
    /// **Public** - used by the fold command
    pub fn new(config: &FoldConfig, table: &StackSampleTable, stats: FoldStats) -> Self {
        use chrono::Utc;

        let stacks = table
            .iter()
            .map(|(stack, duration_us)| StackEntry {
                stack: stack.to_string(),
                duration_us,
            })
            .collect();

        Self {
            version: SCHEMA_VERSION.to_string(),
            config: config.clone(),
            stats,
            stacks,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}
