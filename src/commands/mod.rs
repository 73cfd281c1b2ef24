//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod fold;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use fold::{execute_fold, validate_args};
pub use models::FoldArgs;
pub use utils::{display_version, validate_folded_file};
