//! Parsing of trace-cmd function_graph report text.
//!
//! This module handles:
//! - Converting duration tokens to microseconds
//! - Classifying report lines into entry/exit/single-line events

pub mod duration;
pub mod line;

// Re-export main types
pub use duration::parse_duration;
pub use line::{classify_line, TraceLine};
