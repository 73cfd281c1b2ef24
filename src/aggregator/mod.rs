//! Reconstruction of call stacks and their reduction into folded samples.
//!
//! This module transforms classified report lines into:
//! - Weighted stack samples for the first call of the target function
//! - A folded path -> duration table (for flamegraph generation)
//! - Summary statistics

pub mod metrics;
pub mod session;
pub mod table;

// Re-export main types and functions
pub use metrics::{calculate_fold_stats, FoldStats};
pub use session::{build_stack_samples, fold_report, CallStack, StackSample, TraceSession};
pub use table::{path_depth, StackSampleTable};
