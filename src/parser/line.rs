//! Classification of `trace-cmd report` lines.
//!
//! A function_graph report prints one event per line, after the task, CPU
//! and timestamp columns:
//!
//! ```text
//! munmap-412 [002] 118.401233: funcgraph_entry:                   |  do_mas_munmap() {
//! munmap-412 [002] 118.401234: funcgraph_entry:        0.240 us   |    kfree();
//! munmap-412 [002] 118.401240: funcgraph_exit:       + 12.800 us  |  }
//! ```
//!
//! Only these three shapes are recognized. The classifier is a small
//! hand-written scanner so the grammar stays in one place.

use super::duration::parse_duration;
use crate::utils::config::{ENTRY_MARKER, EXIT_MARKER};

/// One classified report line
///
/// **Public** - consumed by the stack state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceLine<'a> {
    /// `funcgraph_entry: 0.240 us | kfree();` - a call with no nested block
    SingleLineCall { function: &'a str, duration_us: f64 },

    /// `funcgraph_entry: | do_mas_munmap() {` - start of a nested block
    BlockEntry {
        function: &'a str,
        /// Entry-side duration, never used for weighting
        duration_us: Option<f64>,
    },

    /// `funcgraph_exit: + 12.800 us | }` - end of the innermost open block
    BlockExit { duration_us: f64 },

    /// Headers, blank lines, other tracers' events
    Unrecognized,
}

/// Classify a single report line
///
/// **Public** - main entry point of the classifier
///
/// Shapes are tried in priority order: single-line call, block entry,
/// block exit. The first one that matches wins.
pub fn classify_line(line: &str) -> TraceLine<'_> {
    let line = line.trim();

    find_shape(line, ENTRY_MARKER, match_single_line)
        .or_else(|| find_shape(line, ENTRY_MARKER, match_block_entry))
        .or_else(|| find_shape(line, EXIT_MARKER, match_block_exit))
        .unwrap_or(TraceLine::Unrecognized)
}

/// Try `shape` right after every occurrence of `marker`
///
/// **Private** - the marker may sit anywhere behind the leading columns
fn find_shape<'a>(
    line: &'a str,
    marker: &str,
    shape: fn(Cursor<'a>) -> Option<TraceLine<'a>>,
) -> Option<TraceLine<'a>> {
    line.match_indices(marker)
        .find_map(|(pos, m)| shape(Cursor::new(&line[pos + m.len()..])))
}

/// `<D.D> us | name();`
fn match_single_line(mut c: Cursor<'_>) -> Option<TraceLine<'_>> {
    c.skip_whitespace();
    let duration = c.decimal()?;
    c.whitespace1()?;
    c.tag("us")?;
    c.skip_whitespace();
    c.tag("|")?;
    c.skip_whitespace();
    let function = c.word()?;
    c.tag("();")?;

    Some(TraceLine::SingleLineCall {
        function,
        duration_us: parse_duration(duration),
    })
}

/// `[<D.D> us] | name() {`
fn match_block_entry(mut c: Cursor<'_>) -> Option<TraceLine<'_>> {
    c.skip_whitespace();

    let mut lookahead = c;
    let duration = lookahead.duration_column().map(|d| {
        c = lookahead;
        parse_duration(d)
    });

    c.tag("|")?;
    c.skip_whitespace();
    let function = c.word()?;
    c.tag("()")?;
    c.skip_whitespace();
    c.tag("{")?;

    Some(TraceLine::BlockEntry {
        function,
        duration_us: duration,
    })
}

/// `[+|!] <D.D> us | }`
fn match_block_exit(mut c: Cursor<'_>) -> Option<TraceLine<'_>> {
    c.skip_whitespace();

    // Keep the marker in the token, parse_duration strips it
    let start = c.rest;
    if c.tag("+").is_none() {
        let _ = c.tag("!");
    }
    c.skip_whitespace();
    c.decimal()?;
    let token = &start[..start.len() - c.rest.len()];

    c.whitespace1()?;
    c.tag("us")?;
    c.skip_whitespace();
    c.tag("|")?;
    c.skip_whitespace();
    c.tag("}")?;

    Some(TraceLine::BlockExit {
        duration_us: parse_duration(token),
    })
}

/// Forward-only scanner over the tail of a line
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn skip_whitespace(&mut self) -> bool {
        let trimmed = self.rest.trim_start();
        let skipped = trimmed.len() != self.rest.len();
        self.rest = trimmed;
        skipped
    }

    fn whitespace1(&mut self) -> Option<()> {
        self.skip_whitespace().then_some(())
    }

    fn tag(&mut self, expected: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let end = self.rest.find(|c| !pred(c)).unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }

    /// One or more digits, a dot, one or more digits
    fn decimal(&mut self) -> Option<&'a str> {
        let start = self.rest;
        self.take_while(|c| c.is_ascii_digit())?;
        self.tag(".")?;
        self.take_while(|c| c.is_ascii_digit())?;
        Some(&start[..start.len() - self.rest.len()])
    }

    /// `<D.D> us ` including the whitespace before the pipe
    fn duration_column(&mut self) -> Option<&'a str> {
        let duration = self.decimal()?;
        self.whitespace1()?;
        self.tag("us")?;
        self.whitespace1()?;
        Some(duration)
    }

    fn word(&mut self) -> Option<&'a str> {
        self.take_while(|c| c.is_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_entry_without_duration() {
        let line = "munmap-412 [002] 118.401233: funcgraph_entry:                   |  do_mas_munmap() {";
        assert_eq!(
            classify_line(line),
            TraceLine::BlockEntry {
                function: "do_mas_munmap",
                duration_us: None,
            }
        );
    }

    #[test]
    fn test_block_entry_with_duration() {
        let line = "funcgraph_entry:        1.500 us   |  mas_find() {";
        assert_eq!(
            classify_line(line),
            TraceLine::BlockEntry {
                function: "mas_find",
                duration_us: Some(1.5),
            }
        );
    }

    #[test]
    fn test_single_line_call() {
        let line = "munmap-412 [002] 118.401234: funcgraph_entry:        0.240 us   |    kfree();";
        assert_eq!(
            classify_line(line),
            TraceLine::SingleLineCall {
                function: "kfree",
                duration_us: 0.24,
            }
        );
    }

    #[test]
    fn test_block_exit_plain_and_marked() {
        assert_eq!(
            classify_line("funcgraph_exit:         2.000 us   |  }"),
            TraceLine::BlockExit { duration_us: 2.0 }
        );
        assert_eq!(
            classify_line("munmap-412 [002] 118.401240: funcgraph_exit:       + 12.800 us  |  }"),
            TraceLine::BlockExit { duration_us: 12.8 }
        );
        assert_eq!(
            classify_line("funcgraph_exit:       ! 312.004 us  |  }"),
            TraceLine::BlockExit { duration_us: 312.004 }
        );
    }

    #[test]
    fn test_trailing_comment_is_allowed() {
        assert_eq!(
            classify_line("funcgraph_exit:         2.000 us   |  } /* do_mas_munmap */"),
            TraceLine::BlockExit { duration_us: 2.0 }
        );
    }

    #[test]
    fn test_unrecognized_lines() {
        for line in [
            "",
            "CPU 0 is empty",
            "cpus=4",
            "funcgraph_entry: | foo.isra.0() {",
            "funcgraph_exit: 2 us | }",
            "funcgraph_exit:   2.000us | }",
            "sched_switch: prev_comm=bash",
            "funcgraph_entry:   + 15.000 us   |  kfree();",
        ] {
            assert_eq!(classify_line(line), TraceLine::Unrecognized, "line: {line:?}");
        }
    }
}
