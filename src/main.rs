//! funcgraph-flame CLI
//!
//! Folds the first call of a kernel function from trace-cmd function_graph
//! output into flamegraph stacks.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use funcgraph_flame::commands::{
    display_version, execute_fold, validate_args, validate_folded_file, FoldArgs,
};
use funcgraph_flame::tracecmd::ReportSource;
use funcgraph_flame::utils::config::{
    FoldConfig, DEFAULT_INPUT_FILE, DEFAULT_MAX_STACK_DEPTH, DEFAULT_MIN_DURATION_US,
    DEFAULT_OUTPUT_FILE, DEFAULT_TARGET_FUNCTION, DEFAULT_TRACE_CMD, FLAMEGRAPH_WIDTH,
};

/// funcgraph-flame - flamegraphs of one kernel function call
#[derive(Parser, Debug)]
#[command(name = "funcgraph-flame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold the first call of the target function into flamegraph stacks
    Fold {
        /// trace-cmd recording to report on
        #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        /// Read an already rendered report instead ("-" for stdin)
        #[arg(long, conflicts_with = "input")]
        report: Option<String>,

        /// Output path for folded stacks
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Function whose first completed call is captured
        #[arg(short, long, env = "FUNCGRAPH_TARGET", default_value = DEFAULT_TARGET_FUNCTION)]
        target: String,

        /// Minimum duration in microseconds for a stack to be kept
        #[arg(long, env = "FUNCGRAPH_MIN_DURATION_US", default_value_t = DEFAULT_MIN_DURATION_US)]
        min_duration: f64,

        /// Maximum depth of the call stack to track
        #[arg(long, env = "FUNCGRAPH_MAX_DEPTH", default_value_t = DEFAULT_MAX_STACK_DEPTH)]
        max_depth: usize,

        /// trace-cmd binary
        #[arg(long, env = "TRACE_CMD", default_value = DEFAULT_TRACE_CMD)]
        trace_cmd: String,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = FLAMEGRAPH_WIDTH)]
        width: usize,

        /// Output path for JSON stats report (optional)
        #[arg(long)]
        stats_json: Option<PathBuf>,

        /// Do not print the captured stacks to stdout
        #[arg(long)]
        no_summary: bool,
    },

    /// Validate a folded stack file
    Validate {
        /// Path to folded file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Fold {
            input,
            report,
            output,
            target,
            min_duration,
            max_depth,
            trace_cmd,
            flamegraph,
            title,
            width,
            stats_json,
            no_summary,
        } => {
            let source = match report {
                Some(arg) => ReportSource::from_report_arg(&arg),
                None => ReportSource::Capture {
                    binary: trace_cmd,
                    recording: input,
                },
            };

            let config = FoldConfig::new(target)
                .with_min_duration(min_duration)
                .with_max_depth(max_depth);

            let args = FoldArgs {
                source,
                output_folded: output,
                config,
                output_svg: flamegraph,
                flamegraph_title: title,
                flamegraph_width: width,
                output_json: stats_json,
                print_summary: !no_summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_fold(args)?;
        }

        Commands::Validate { file } => {
            validate_folded_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
