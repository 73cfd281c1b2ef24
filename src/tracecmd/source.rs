//! Where the report text comes from.

use super::client::TraceCmd;
use crate::aggregator::{build_stack_samples, fold_report, StackSampleTable};
use crate::utils::config::FoldConfig;
use crate::utils::error::CaptureError;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Source of function_graph report text
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    /// Run `<binary> report <recording>`
    Capture { binary: String, recording: PathBuf },

    /// Read an already rendered report
    File(PathBuf),

    /// Read a rendered report from stdin
    Stdin,
}

impl ReportSource {
    /// `-` means stdin, anything else is a file
    pub fn from_report_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Capture { binary, recording } => {
                format!("{} report {}", binary, recording.display())
            }
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }

    /// Obtain the report and fold it
    ///
    /// **Public** - used by the fold command
    ///
    /// The trace-cmd output is materialized before folding. Files and stdin
    /// are read line by line and reading stops once the target's first call
    /// has completed.
    ///
    /// # Errors
    /// Any `CaptureError`; nothing is folded when the report cannot be read.
    pub fn fold(&self, config: &FoldConfig) -> Result<StackSampleTable, CaptureError> {
        info!("Reading report from {}", self.describe());

        let table = match self {
            Self::Capture { binary, recording } => {
                let text = TraceCmd::new(binary.as_str()).report(recording)?;
                build_stack_samples(text.lines(), config)
            }
            Self::File(path) => {
                let file = File::open(path)?;
                fold_report(BufReader::new(file), config)?
            }
            Self::Stdin => fold_report(std::io::stdin().lock(), config)?,
        };

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_report_arg() {
        assert_eq!(ReportSource::from_report_arg("-"), ReportSource::Stdin);
        assert_eq!(
            ReportSource::from_report_arg("report.txt"),
            ReportSource::File(PathBuf::from("report.txt"))
        );
    }

    #[test]
    fn test_fold_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "funcgraph_entry:                   |  target() {{").unwrap();
        writeln!(file, "funcgraph_exit:         3.000 us   |  }}").unwrap();

        let source = ReportSource::File(file.path().to_path_buf());
        let table = source.fold(&FoldConfig::new("target")).unwrap();

        assert_eq!(table.get("target"), Some(3.0));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = ReportSource::File(PathBuf::from("/nonexistent/report.txt"));
        assert!(matches!(
            source.fold(&FoldConfig::default()),
            Err(CaptureError::ReadFailed(_))
        ));
    }

    #[test]
    fn test_missing_trace_cmd_is_an_error() {
        let source = ReportSource::Capture {
            binary: "definitely-not-a-trace-cmd-binary".to_string(),
            recording: PathBuf::from("trace.dat"),
        };
        assert!(matches!(
            source.fold(&FoldConfig::default()),
            Err(CaptureError::ToolUnavailable { .. })
        ));
    }
}
