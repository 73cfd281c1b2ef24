//! Access to the trace-cmd report text.

pub mod client;
pub mod source;

pub use client::TraceCmd;
pub use source::ReportSource;
