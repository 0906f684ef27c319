//! Classification and statistics gathered across the trials of one run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Label counts and numeric collections for one run.
///
/// A label is counted at most once per trial, so `count(label) <= total()`
/// always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    labels: BTreeMap<String, usize>,
    collections: BTreeMap<String, Vec<f64>>,
    total: usize,
}

/// Summary of a numeric collection, computed over its finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial carrying `labels`. Duplicate labels count once.
    pub fn record_trial<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.total += 1;
        let unique: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        for label in unique {
            *self.labels.entry(label).or_insert(0) += 1;
        }
    }

    pub fn record_collection(&mut self, name: &str, value: f64) {
        self.collections
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    /// Number of trials recorded.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, label: &str) -> usize {
        self.labels.get(label).copied().unwrap_or(0)
    }

    /// Share of trials carrying `label`, in `[0, 1]`.
    pub fn fraction(&self, label: &str) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(label) as f64 / self.total as f64
        }
    }

    /// Whether at least one trial carried `label`.
    pub fn covered(&self, label: &str) -> bool {
        self.count(label) > 0
    }

    /// Labels with their counts, sorted by label.
    pub fn labels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(label, &count)| (label.as_str(), count))
    }

    pub fn collection(&self, name: &str) -> Option<&[f64]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Min, max, mean and median of the finite values collected under `name`.
    pub fn summary(&self, name: &str) -> Option<CollectionSummary> {
        let mut finite: Vec<f64> = self
            .collection(name)?
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(|a, b| a.total_cmp(b));
        let len = finite.len();
        let median = if len % 2 == 0 {
            (finite[len / 2 - 1] + finite[len / 2]) / 2.0
        } else {
            finite[len / 2]
        };
        Some(CollectionSummary {
            min: finite[0],
            max: finite[len - 1],
            mean: finite.iter().sum::<f64>() / len as f64,
            median,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.collections.is_empty()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.labels.is_empty() {
            writeln!(f, "  Test data distribution:")?;
            for (label, count) in self.labels() {
                let percentage = self.fraction(label) * 100.0;
                writeln!(f, "    {percentage:>5.1}% {label} ({count})")?;
            }
        }

        if !self.collections.is_empty() {
            writeln!(f, "  Test data statistics:")?;
            for name in self.collections.keys() {
                if let Some(summary) = self.summary(name) {
                    writeln!(
                        f,
                        "    {}: min={:.1}, max={:.1}, avg={:.1}, median={:.1}",
                        name, summary.min, summary.max, summary.mean, summary.median
                    )?;
                }
            }
        }

        Ok(())
    }
}
