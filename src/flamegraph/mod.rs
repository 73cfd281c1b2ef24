//! Flamegraph generation using the inferno library.
//!
//! This module converts the folded stack table into an SVG flamegraph,
//! and produces the console summary and flamegraph.pl hint.

pub mod generator;

// Re-export main types
pub use generator::{
    flamegraph_command_hint, generate_flamegraph, generate_text_summary, FlamegraphConfig,
};
