//! Folded path -> duration table.
//!
//! A later sample for a path replaces the earlier one. Repeated identical
//! paths inside the captured call are NOT summed: the flame graph shows the
//! last measured duration of each path.

use super::session::StackSample;
use crate::utils::config::FRAME_SEPARATOR;
use std::collections::BTreeMap;

/// Samples keyed by folded path, iterated in path order
///
/// **Public** - filled by the session, read by the exporter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackSampleTable {
    stacks: BTreeMap<String, f64>,
}

impl StackSampleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample, replacing any previous duration for its path
    pub fn insert(&mut self, sample: StackSample) {
        self.insert_folded(sample.folded(), sample.duration_us);
    }

    /// Store an already folded path
    pub fn insert_folded(&mut self, path: impl Into<String>, duration_us: f64) {
        self.stacks.insert(path.into(), duration_us);
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.stacks.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Entries sorted lexicographically by path
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.stacks.iter().map(|(path, duration)| (path.as_str(), *duration))
    }
}

impl FromIterator<(String, f64)> for StackSampleTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (path, duration) in iter {
            table.insert_folded(path, duration);
        }
        table
    }
}

/// Number of frames in a folded path
pub fn path_depth(path: &str) -> usize {
    path.matches(FRAME_SEPARATOR).count() + 1
}
