//! Call stack reconstruction for the first call of the target function.
//!
//! The session consumes classified report lines strictly in order. It starts
//! tracking when the target function's block is entered, pushes nested
//! entries up to the configured depth, and emits one weighted sample per
//! exit. Once the target's first call has returned and the stack is empty,
//! the session is finished and the rest of the stream is never looked at.

use super::table::StackSampleTable;
use crate::parser::{classify_line, TraceLine};
use crate::utils::config::{FoldConfig, FRAME_SEPARATOR, HEADER_PREFIXES};
use log::debug;
use std::io::BufRead;

/// A call path and the duration measured at its exit
///
/// **Public** - produced by `TraceSession::advance`
#[derive(Debug, Clone, PartialEq)]
pub struct StackSample {
    /// Frames from the target function down to the sampled call
    pub frames: Vec<String>,

    /// Exit-side duration in microseconds
    pub duration_us: f64,
}

impl StackSample {
    pub fn new(frames: Vec<String>, duration_us: f64) -> Self {
        Self { frames, duration_us }
    }

    /// `parent;child;grandchild`
    pub fn folded(&self) -> String {
        self.frames.join(FRAME_SEPARATOR)
    }
}

/// Depth-bounded stack of function names
///
/// **Public** - owned by the session
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<String>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Push unless the stack is full. Returns whether the frame was kept.
    pub fn push(&mut self, function: &str) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(function.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

/// State of one fold run
///
/// **Public** - step it with `advance`, or drive a whole stream with
/// `build_stack_samples` / `fold_report`
#[derive(Debug, Clone)]
pub struct TraceSession {
    config: FoldConfig,

    /// Inside the target's first call (entered, not yet returned)
    in_target: bool,

    /// The target's first call has returned
    found_first: bool,

    stack: CallStack,

    /// Entries consumed while the stack was full; their exits are
    /// matched against this count instead of the tracked frames
    untracked: usize,
}

impl TraceSession {
    pub fn new(config: FoldConfig) -> Self {
        let stack = CallStack::new(config.max_stack_depth);
        Self {
            config,
            in_target: false,
            found_first: false,
            stack,
            untracked: 0,
        }
    }

    pub fn in_target(&self) -> bool {
        self.in_target
    }

    pub fn found_first(&self) -> bool {
        self.found_first
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// The first call has completed and nothing is left open
    pub fn is_finished(&self) -> bool {
        self.found_first && self.stack.is_empty()
    }

    /// Apply one classified line
    ///
    /// **Public** - the state machine step function
    ///
    /// # Returns
    /// The sample produced by this line, if any
    pub fn advance(&mut self, line: &TraceLine<'_>) -> Option<StackSample> {
        match *line {
            TraceLine::SingleLineCall {
                function,
                duration_us,
            } => self.on_single_line(function, duration_us),
            TraceLine::BlockEntry { function, .. } => {
                self.on_entry(function);
                None
            }
            TraceLine::BlockExit { duration_us } => self.on_exit(duration_us),
            TraceLine::Unrecognized => None,
        }
    }

    fn on_single_line(&mut self, function: &str, duration_us: f64) -> Option<StackSample> {
        let mut sample = None;

        if self.in_target && self.meets_threshold(duration_us) {
            // Self-contained call: sampled on top of the stack, never pushed
            if self.stack.len() < self.config.max_stack_depth {
                let mut frames = self.stack.frames().to_vec();
                frames.push(function.to_string());
                sample = Some(StackSample::new(frames, duration_us));
            }
        }

        if function == self.config.target_function {
            debug!("Target {} reported as a single-line call", function);
            self.complete();
        }

        sample
    }

    fn on_entry(&mut self, function: &str) {
        if function == self.config.target_function && !self.in_target {
            debug!("Entered {}, tracking started", function);
            self.in_target = true;
            self.stack.clear();
            self.untracked = 0;
        }

        if self.in_target && !self.stack.push(function) {
            self.untracked += 1;
            debug!(
                "Stack depth {} reached, not tracking {}",
                self.config.max_stack_depth, function
            );
        }
    }

    fn on_exit(&mut self, duration_us: f64) -> Option<StackSample> {
        if self.stack.is_empty() {
            debug!("Exit with no open frame ignored");
            return None;
        }

        if self.untracked > 0 {
            self.untracked -= 1;
            return None;
        }

        let sample = (self.in_target && self.meets_threshold(duration_us))
            .then(|| StackSample::new(self.stack.frames().to_vec(), duration_us));

        if let Some(function) = self.stack.pop() {
            if function == self.config.target_function {
                debug!("{} returned after {:.2}us", function, duration_us);
                self.complete();
            }
        }

        sample
    }

    fn complete(&mut self) {
        self.found_first = true;
        self.in_target = false;
    }

    fn meets_threshold(&self, duration_us: f64) -> bool {
        duration_us >= self.config.min_duration_us
    }
}

/// Is this a blank or header line that never reaches the state machine
///
/// **Private** - `CPU n is empty` banners, `cpus=N` headers, blank lines
fn is_skippable(line: &str) -> bool {
    line.is_empty() || HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Fold an in-memory line stream
///
/// **Public** - main entry point for stack reconstruction
///
/// # Arguments
/// * `lines` - Report lines in order
/// * `config` - Fold settings
///
/// # Returns
/// Table of folded path -> duration for the first call of the target
pub fn build_stack_samples<I, S>(lines: I, config: &FoldConfig) -> StackSampleTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut session = TraceSession::new(config.clone());
    let mut table = StackSampleTable::new();
    let mut lines = lines.into_iter();
    let mut consumed = 0usize;

    // Checked before pulling the next line so nothing past the first call is read
    while !session.is_finished() {
        let Some(raw) = lines.next() else {
            break;
        };
        let line = raw.as_ref().trim();

        if is_skippable(line) {
            continue;
        }
        consumed += 1;

        if let Some(sample) = session.advance(&classify_line(line)) {
            table.insert(sample);
        }
    }

    if session.is_finished() {
        debug!(
            "First call of {} complete after {} lines, stopping",
            config.target_function, consumed
        );
    } else {
        debug!("{} never completed in this trace", config.target_function);
    }

    debug!("Collected {} unique stacks", table.len());
    table
}

/// Fold a report read line by line
///
/// **Public** - streaming variant of `build_stack_samples`
///
/// # Errors
/// Any I/O error from the reader. Reading stops as soon as the first call
/// of the target has completed.
pub fn fold_report<R: BufRead>(
    reader: R,
    config: &FoldConfig,
) -> std::io::Result<StackSampleTable> {
    let mut read_error = None;

    let lines = reader.lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            read_error = Some(e);
            None
        }
    });
    let table = build_stack_samples(lines, config);

    match read_error {
        Some(e) => Err(e),
        None => Ok(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: f64, depth: usize) -> FoldConfig {
        FoldConfig::new("target")
            .with_min_duration(min)
            .with_max_depth(depth)
    }

    fn entry(function: &str) -> TraceLine<'_> {
        TraceLine::BlockEntry {
            function,
            duration_us: None,
        }
    }

    fn exit(duration_us: f64) -> TraceLine<'static> {
        TraceLine::BlockExit { duration_us }
    }

    #[test]
    fn test_entry_outside_target_is_not_tracked() {
        let mut session = TraceSession::new(config(0.1, 5));
        assert_eq!(session.advance(&entry("other")), None);
        assert!(session.stack().is_empty());
        assert!(!session.in_target());
    }

    #[test]
    fn test_target_occupies_first_slot() {
        let mut session = TraceSession::new(config(0.1, 5));
        session.advance(&entry("target"));
        session.advance(&entry("child"));

        assert!(session.in_target());
        assert_eq!(session.stack().frames(), ["target", "child"]);
    }

    #[test]
    fn test_exit_emits_full_stack_then_pops() {
        let mut session = TraceSession::new(config(0.1, 5));
        session.advance(&entry("target"));
        session.advance(&entry("child"));

        let sample = session.advance(&exit(0.5)).unwrap();
        assert_eq!(sample.folded(), "target;child");
        assert_eq!(sample.duration_us, 0.5);
        assert_eq!(session.stack().len(), 1);

        let sample = session.advance(&exit(2.0)).unwrap();
        assert_eq!(sample.folded(), "target");
        assert!(session.found_first());
        assert!(!session.in_target());
        assert!(session.is_finished());
    }

    #[test]
    fn test_short_exit_still_pops() {
        let mut session = TraceSession::new(config(1.0, 5));
        session.advance(&entry("target"));
        session.advance(&entry("child"));

        assert_eq!(session.advance(&exit(0.5)), None);
        assert_eq!(session.stack().frames(), ["target"]);
    }

    #[test]
    fn test_single_line_call_does_not_push() {
        let mut session = TraceSession::new(config(0.1, 5));
        session.advance(&entry("target"));

        let sample = session
            .advance(&TraceLine::SingleLineCall {
                function: "kfree",
                duration_us: 0.3,
            })
            .unwrap();

        assert_eq!(sample.folded(), "target;kfree");
        assert_eq!(session.stack().frames(), ["target"]);
    }

    #[test]
    fn test_single_line_call_beyond_depth_is_dropped() {
        let mut session = TraceSession::new(config(0.1, 2));
        session.advance(&entry("target"));
        session.advance(&entry("child"));

        let sample = session.advance(&TraceLine::SingleLineCall {
            function: "leaf",
            duration_us: 1.0,
        });
        assert_eq!(sample, None);
    }

    #[test]
    fn test_single_line_target_completes_occurrence() {
        let mut session = TraceSession::new(config(0.1, 5));
        let sample = session.advance(&TraceLine::SingleLineCall {
            function: "target",
            duration_us: 4.0,
        });

        // Not inside the target yet, so nothing is sampled
        assert_eq!(sample, None);
        assert!(session.found_first());
        assert!(session.is_finished());
    }

    #[test]
    fn test_single_line_target_inside_target_ends_sampling() {
        let mut session = TraceSession::new(config(0.1, 5));
        session.advance(&entry("target"));
        session.advance(&entry("a"));

        let sample = session
            .advance(&TraceLine::SingleLineCall {
                function: "target",
                duration_us: 4.0,
            })
            .unwrap();

        // Sampled as a leaf of the open stack, then the occurrence is over
        assert_eq!(sample.folded(), "target;a;target");
        assert!(session.found_first());
        assert!(!session.in_target());
        assert_eq!(session.stack().frames(), ["target", "a"]);
        assert!(!session.is_finished());

        // Open frames still unwind, but nothing more is sampled
        assert_eq!(session.advance(&exit(6.0)), None);
        assert_eq!(session.stack().frames(), ["target"]);
        assert_eq!(session.advance(&exit(9.0)), None);
        assert!(session.stack().is_empty());
        assert!(session.is_finished());
    }

    #[test]
    fn test_exit_with_empty_stack_is_ignored() {
        let mut session = TraceSession::new(config(0.1, 5));
        assert_eq!(session.advance(&exit(3.0)), None);
        assert!(!session.found_first());
    }

    #[test]
    fn test_exits_of_untracked_frames_are_skipped() {
        let mut session = TraceSession::new(config(0.0, 2));
        session.advance(&entry("target"));
        session.advance(&entry("a"));
        session.advance(&entry("b"));

        assert_eq!(session.stack().frames(), ["target", "a"]);
        assert_eq!(session.advance(&exit(1.0)), None);

        let sample = session.advance(&exit(2.0)).unwrap();
        assert_eq!(sample.folded(), "target;a");
    }

    #[test]
    fn test_header_lines_are_skipped() {
        assert!(is_skippable(""));
        assert!(is_skippable("CPU 3 is empty"));
        assert!(is_skippable("cpus=8"));
        assert!(!is_skippable("funcgraph_exit: 1.0 us | }"));
    }
}
