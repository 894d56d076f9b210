//! Frequency counting for the statistics reports.
//!
//! Every "most common" value in the reports comes from [`FrequencyTable`], so
//! tie-breaking is decided in exactly one place: among values sharing the
//! highest count, the one seen first wins.

use std::collections::HashMap;
use std::hash::Hash;

// ── FrequencyTable ────────────────────────────────────────────────────────────

/// Occurrence counts of values, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most frequent value and its count.
    ///
    /// Ties go to the value that was first added. `None` when empty.
    pub fn mode(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in &self.entries {
            if best.map_or(true, |(_, n)| *count > n) {
                best = Some((key, *count));
            }
        }
        best
    }

    /// All values with their counts, most frequent first.
    ///
    /// Equal counts keep first-seen order.
    pub fn value_counts(&self) -> Vec<(K, usize)> {
        let mut counts = self.entries.clone();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
