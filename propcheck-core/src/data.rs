//! Core data types: sizes, splittable seeds and run configuration.

use crate::error::{PropcheckError, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Size parameter for controlling test data generation.
///
/// Size typically ranges from 0 to 100, where larger values
/// generate more complex test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(pub usize);

impl Size {
    /// The size at which linear ranges reach their full bounds.
    pub const MAX: usize = 100;

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Size for trial `trial` of `trials`, interpolated linearly between
    /// `start` and `end` so the first trial gets `start` and the last `end`.
    pub fn for_trial(trial: usize, trials: usize, start: usize, end: usize) -> Self {
        let span = end.saturating_sub(start) as u128;
        let steps = trials.saturating_sub(1).max(1);
        let offset = span * trial.min(steps) as u128 / steps as u128;
        Size(start + offset as usize)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Splittable random seed for deterministic test generation.
///
/// Every draw returns the advanced seed alongside the value, and `split`
/// hands out two independent streams, so a value is fully determined by the
/// `(Size, Seed)` it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a value uniformly in `[lo, hi]` over the full `i128` span.
    pub fn next_in_range(self, lo: i128, hi: i128) -> (i128, Self) {
        let span = (hi - lo) as u128 + 1;
        if span > u64::MAX as u128 {
            // Two draws cover spans wider than 64 bits.
            let (high, seed) = self.next_u64();
            let (low, seed) = seed.next_u64();
            let wide = ((high as u128) << 64) | low as u128;
            (lo + (wide % span) as i128, seed)
        } else {
            let (value, seed) = self.next_bounded(span as u64);
            (lo + value as i128, seed)
        }
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        let (value, new_seed) = self.next_u64();
        (value & 1 == 1, new_seed)
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed::from_u64(rng.gen())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Receives the labels attached to every executed trial.
pub trait LabelSink: Send + Sync {
    fn record(&self, trial: usize, labels: &[String]);
}

impl<F> LabelSink for F
where
    F: Fn(usize, &[String]) + Send + Sync,
{
    fn record(&self, trial: usize, labels: &[String]) {
        self(trial, labels)
    }
}

/// Configuration for property testing.
#[derive(Clone)]
pub struct Config {
    /// Maximum number of tests to run.
    pub test_limit: usize,

    /// Maximum number of shrinks to attempt.
    pub shrink_limit: usize,

    /// Size hint of the first trial.
    pub start_size: usize,

    /// Size hint of the last trial.
    pub size_limit: usize,

    /// Maximum number of discards before giving up.
    pub discard_limit: usize,

    /// Fixed seed for replaying a run; random when absent.
    pub seed: Option<u64>,

    /// Wall clock budget, checked between trials only.
    pub time_budget: Option<Duration>,

    /// Optional observer of per-trial labels.
    pub label_sink: Option<Arc<dyn LabelSink>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            start_size: 0,
            size_limit: Size::MAX,
            discard_limit: 100,
            seed: None,
            time_budget: None,
            label_sink: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("test_limit", &self.test_limit)
            .field("shrink_limit", &self.shrink_limit)
            .field("start_size", &self.start_size)
            .field("size_limit", &self.size_limit)
            .field("discard_limit", &self.discard_limit)
            .field("seed", &self.seed)
            .field("time_budget", &self.time_budget)
            .field("label_sink", &self.label_sink.is_some())
            .finish()
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Grow the size hint from `start` to `end` across the run.
    pub fn with_size_range(mut self, start: usize, end: usize) -> Self {
        self.start_size = start;
        self.size_limit = end;
        self
    }

    /// Replay with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with the given discard limit.
    pub fn with_discards(mut self, discards: usize) -> Self {
        self.discard_limit = discards;
        self
    }

    /// Stop starting new trials once `budget` has elapsed.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Forward every trial's labels to `sink`.
    pub fn with_label_sink<S>(mut self, sink: S) -> Self
    where
        S: LabelSink + 'static,
    {
        self.label_sink = Some(Arc::new(sink));
        self
    }

    /// Check that the configuration describes a runnable schedule.
    pub fn validate(&self) -> Result<()> {
        if self.test_limit == 0 {
            return Err(PropcheckError::InvalidConfig {
                message: "test_limit must be at least 1".to_string(),
            });
        }
        if self.start_size > self.size_limit {
            return Err(PropcheckError::InvalidConfig {
                message: format!(
                    "start size {} exceeds end size {}",
                    self.start_size, self.size_limit
                ),
            });
        }
        Ok(())
    }

    /// Seed for the run: the fixed one if configured, else a fresh random one.
    pub fn initial_seed(&self) -> Seed {
        self.seed.map(Seed::from_u64).unwrap_or_else(Seed::random)
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Gamma must be odd for a full period.
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
