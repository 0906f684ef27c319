//! Error types for propcheck.

use std::time::Duration;
use thiserror::Error;

/// Main error type for propcheck.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropcheckError {
    /// Property test failed with a counterexample.
    #[error("Property test failed after {tests_run} tests and {shrinks_performed} shrinks: {counterexample}")]
    PropertyFailed {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
    },

    /// Too many test cases were discarded.
    #[error("Too many test cases discarded (limit: {limit})")]
    TooManyDiscards { limit: usize },

    /// A constrained generator could not produce a value.
    #[error(transparent)]
    GenerationExhausted(#[from] GenerationExhausted),

    /// The time budget ran out before the run finished.
    #[error("Time budget of {budget:?} ran out after {tests_run} tests")]
    OutOfTime { budget: Duration, tests_run: usize },

    /// A coverage requirement was not met.
    #[error("Label {label:?} covered {actual:.1}% of tests, expected at least {expected:.1}%")]
    InsufficientCoverage {
        label: String,
        expected: f64,
        actual: f64,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },
}

impl PropcheckError {
    pub(crate) fn invalid_generator(message: impl Into<String>) -> Self {
        PropcheckError::InvalidGenerator {
            message: message.into(),
        }
    }
}

/// Result type for propcheck operations.
pub type Result<T> = std::result::Result<T, PropcheckError>;

/// A filtered generator gave up before finding an acceptable value.
///
/// This is a property of the generator, not of the code under test, so
/// the runner reports it separately from failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Generator exhausted after {attempts} attempts")]
pub struct GenerationExhausted {
    pub attempts: usize,
}

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = accepted shrinks).
    pub step: usize,
    /// Optional variable name for this input (e.g., "xs", "n", "input").
    pub variable_name: Option<String>,
}
