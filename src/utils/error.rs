//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while obtaining the report text
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to run {binary}: {source}")]
    ToolUnavailable {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    ToolFailed {
        binary: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Trace report is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to read trace report: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors raised by invalid fold settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Maximum stack depth must be at least 1 (got {0})")]
    InvalidDepth(usize),

    #[error("Minimum duration must be a non-negative number of microseconds (got {0})")]
    InvalidThreshold(f64),

    #[error("Target function name cannot be empty")]
    EmptyTarget,
}

/// Errors that can occur while reading a folded stack file
#[derive(Error, Debug)]
pub enum FoldedParseError {
    #[error("Line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Failed to generate flamegraph: {0}")]
    GenerationFailed(String),

    #[error("Empty stack data")]
    EmptyStacks,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
