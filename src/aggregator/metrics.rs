//! Summary statistics over a folded stack table.
//!
//! "Total time" is the longest sample, which is the target function's own
//! exit duration whenever it meets the threshold.

use super::table::{path_depth, StackSampleTable};
use log::debug;
use serde::{Deserialize, Serialize};

/// Statistics for one captured call
///
/// **Public** - printed by the fold command and stored in the stats report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldStats {
    /// Number of unique stacks
    pub total_entries: usize,

    /// Frames in the deepest path
    pub max_depth: usize,

    /// Longest sample (microseconds)
    pub max_duration_us: f64,
}

impl FoldStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total time: {:.2}μs | Max depth: {} | Unique stacks: {}",
            self.max_duration_us, self.max_depth, self.total_entries
        )
    }
}

/// Calculate statistics from a stack table
///
/// **Public** - main entry point for metrics calculation
///
/// An empty table yields all-zero statistics.
pub fn calculate_fold_stats(table: &StackSampleTable) -> FoldStats {
    let stats = table.iter().fold(
        FoldStats {
            total_entries: table.len(),
            ..FoldStats::default()
        },
        |mut stats, (path, duration)| {
            stats.max_depth = stats.max_depth.max(path_depth(path));
            stats.max_duration_us = stats.max_duration_us.max(duration);
            stats
        },
    );

    debug!("{}", stats.summary());
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_fold_stats() {
        let table: StackSampleTable = vec![
            ("target".to_string(), 12.5),
            ("target;unmap_region".to_string(), 9.0),
            ("target;unmap_region;zap_pte_range".to_string(), 4.25),
        ]
        .into_iter()
        .collect();

        let stats = calculate_fold_stats(&table);

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.max_duration_us, 12.5);
    }

    #[test]
    fn test_stats_empty() {
        let stats = calculate_fold_stats(&StackSampleTable::new());
        assert_eq!(stats, FoldStats::default());
        assert_eq!(stats.max_duration_us, 0.0);
    }

    #[test]
    fn test_summary_format() {
        let stats = FoldStats {
            total_entries: 2,
            max_depth: 2,
            max_duration_us: 2.0,
        };
        assert_eq!(
            stats.summary(),
            "Total time: 2.00μs | Max depth: 2 | Unique stacks: 2"
        );
    }
}
