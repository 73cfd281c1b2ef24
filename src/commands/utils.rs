use crate::aggregator::calculate_fold_stats;
use crate::output::read_folded;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a folded stack file
pub fn validate_folded_file(file_path: PathBuf) -> Result<()> {
    println!("Validating folded stacks: {}", file_path.display());

    let table = read_folded(&file_path)
        .with_context(|| format!("Invalid folded file {}", file_path.display()))?;
    let stats = calculate_fold_stats(&table);

    println!("✓ Valid folded stacks");
    println!("  Unique stacks: {}", stats.total_entries);
    println!("  Maximum stack depth: {}", stats.max_depth);
    println!("  Total time: {:.2}μs", stats.max_duration_us);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("funcgraph-flame v{}", env!("CARGO_PKG_VERSION"));
    println!("Stats Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Folds the first call of a kernel function from trace-cmd function_graph output.");
}
