//! Fold command implementation.
//!
//! The fold command:
//! 1. Obtains the report text (trace-cmd or a rendered report)
//! 2. Reconstructs the first call of the target function
//! 3. Writes folded stacks
//! 4. Generates flamegraph (optional)
//! 5. Writes a JSON stats report (optional)

use super::models::FoldArgs;
use crate::aggregator::{calculate_fold_stats, FoldStats};
use crate::flamegraph::{
    flamegraph_command_hint, generate_flamegraph, generate_text_summary, FlamegraphConfig,
};
use crate::output::{write_folded, write_report, write_svg, FoldReport};
use crate::tracecmd::ReportSource;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the fold command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Statistics of the captured call
///
/// # Errors
/// * Report could not be obtained (no output file is written)
/// * File write errors
pub fn execute_fold(args: FoldArgs) -> Result<FoldStats> {
    let start_time = Instant::now();
    let config = &args.config;

    info!("Analyzing first occurrence of: {}", config.target_function);
    info!(
        "Settings: minimum duration {}μs, maximum stack depth {}",
        config.min_duration_us, config.max_stack_depth
    );

    // Step 1: Obtain report and reconstruct stacks
    info!("Step 1/5: Reconstructing call stacks from {}...", args.source.describe());
    let table = args
        .source
        .fold(config)
        .context("Failed to obtain trace report")?;

    if table.is_empty() {
        warn!("No samples captured for {}", config.target_function);
    }

    // Step 2: Statistics
    info!("Step 2/5: Calculating statistics...");
    let stats = calculate_fold_stats(&table);
    info!("{}", stats.summary());

    // Step 3: Folded output
    info!("Step 3/5: Writing folded stacks...");
    let lines = write_folded(&table, &args.output_folded)
        .context("Failed to write folded stacks")?;
    debug!("{} folded lines written", lines);

    // Step 4: Flamegraph (if requested)
    match &args.output_svg {
        Some(svg_path) if !table.is_empty() => {
            info!("Step 4/5: Generating flamegraph...");
            let mut fg_config = FlamegraphConfig::for_target(&config.target_function, &stats)
                .with_width(args.flamegraph_width);
            if let Some(title) = &args.flamegraph_title {
                fg_config = fg_config.with_title(title.as_str());
            }
            let svg = generate_flamegraph(&table, Some(&fg_config))
                .context("Failed to generate flamegraph")?;
            write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
            info!("✓ Flamegraph written to: {}", svg_path.display());
        }
        Some(_) => warn!("Step 4/5: Nothing captured, skipping flamegraph"),
        None => info!("Step 4/5: Skipping flamegraph generation (not requested)"),
    }

    // Step 5: Stats report (if requested)
    if let Some(json_path) = &args.output_json {
        info!("Step 5/5: Writing stats report...");
        let report = FoldReport::new(config, &table, stats.clone());
        write_report(&report, json_path).context("Failed to write stats report")?;
        info!("✓ Stats report written to: {}", json_path.display());
    } else {
        info!("Step 5/5: Skipping stats report (not requested)");
    }

    if args.print_summary {
        println!("\n{}", generate_text_summary(&table, &stats));
        println!("\nOutput written to {}", args.output_folded.display());
        println!("\nNow you can generate the flame graph using:");
        println!("{}", flamegraph_command_hint(config, &stats, &args.output_folded));
    }

    let elapsed = start_time.elapsed();
    info!("Fold completed in {:.2}s", elapsed.as_secs_f64());

    Ok(stats)
}

/// Validate fold arguments
///
/// **Public** - can be called before execute_fold for early validation
pub fn validate_args(args: &FoldArgs) -> Result<()> {
    args.config.validate().context("Invalid fold settings")?;

    if args.output_folded.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.flamegraph_width == 0 {
        anyhow::bail!("Flamegraph width must be greater than 0");
    }

    match &args.source {
        ReportSource::Capture { binary, recording } => {
            if binary.is_empty() {
                anyhow::bail!("trace-cmd binary cannot be empty");
            }
            if recording.as_os_str().is_empty() {
                anyhow::bail!("Trace recording path cannot be empty");
            }
        }
        ReportSource::File(path) => {
            if !path.is_file() {
                anyhow::bail!("Report file not found: {}", path.display());
            }
        }
        ReportSource::Stdin => {}
    }

    let outputs = [
        Some(&args.output_folded),
        args.output_svg.as_ref(),
        args.output_json.as_ref(),
    ];
    for (i, a) in outputs.iter().enumerate() {
        for b in &outputs[i + 1..] {
            if let (Some(a), Some(b)) = (a, b) {
                if a == b {
                    anyhow::bail!("Output paths must differ: {}", a.display());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::FoldConfig;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_defaults() {
        assert!(validate_args(&FoldArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_zero_depth() {
        let args = FoldArgs {
            config: FoldConfig::default().with_max_depth(0),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output() {
        let args = FoldArgs {
            output_folded: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_report_file() {
        let args = FoldArgs {
            source: ReportSource::File(PathBuf::from("/nonexistent/report.txt")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_duplicate_outputs() {
        let args = FoldArgs {
            output_json: Some(PathBuf::from("output.folded")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_stdin() {
        let args = FoldArgs {
            source: ReportSource::Stdin,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }
}
