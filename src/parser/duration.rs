//! Duration tokens from the function_graph duration column.
//!
//! trace-cmd prefixes long durations with a marker: `+` above 10us and
//! `!` above 100us. The marker carries no information we need.

/// Parse a duration token into microseconds
///
/// **Public** - used by the line classifier
///
/// Strips a leading `+` and/or `!` marker (and the whitespace after it)
/// then parses the remainder. Anything unparseable is `0.0`, which the
/// state machine treats as "no measurable duration".
///
/// # Example
/// ```
/// use funcgraph_flame::parser::parse_duration;
///
/// assert_eq!(parse_duration("+ 12.345"), 12.345);
/// assert_eq!(parse_duration("garbage"), 0.0);
/// ```
pub fn parse_duration(token: &str) -> f64 {
    let mut token = token.trim();

    if let Some(rest) = token.strip_prefix('+') {
        token = rest.trim();
    }
    if let Some(rest) = token.strip_prefix('!') {
        token = rest.trim();
    }

    token.parse::<f64>().unwrap_or(0.0)
}
