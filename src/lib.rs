//! funcgraph-flame
//!
//! Reconstructs the call tree of the first call of a kernel function from
//! `trace-cmd report` function_graph output and folds it into flamegraph
//! stacks.
//!
//! This crate provides the core implementation for the
//! `funcgraph-flame` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-cmd record -p function_graph -g do_mas_munmap ./workload
//! funcgraph-flame fold --input trace.dat --output output.folded
//! ```
//!
//! ## Library use
//!
//! ```
//! use funcgraph_flame::aggregator::build_stack_samples;
//! use funcgraph_flame::output::render_folded;
//! use funcgraph_flame::utils::FoldConfig;
//!
//! let report = "\
//! funcgraph_entry:                   |  do_mas_munmap() {
//! funcgraph_entry:        0.300 us   |    kfree();
//! funcgraph_exit:         2.000 us   |  }";
//!
//! let table = build_stack_samples(report.lines(), &FoldConfig::default());
//! assert_eq!(render_folded(&table), "do_mas_munmap 2.0\ndo_mas_munmap;kfree 0.3\n");
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod tracecmd;
pub mod utils;
