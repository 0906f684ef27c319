//! Results of a property run.

use crate::classify::Classification;
use crate::data::{Seed, Size};
use crate::error::{GenerationExhausted, PropcheckError, Result, ShrinkStep};
use std::fmt;
use std::time::Duration;

/// A minimal failing input together with what is needed to replay it.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    pub value: T,
    /// Labels attached to the minimal value.
    pub labels: Vec<String>,
    pub message: Option<String>,
    /// Seed of the failing trial; pass it to `Property::recheck` with `size`.
    pub seed: Seed,
    pub size: Size,
    pub shrinks: usize,
    pub shrink_steps: Vec<ShrinkStep>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    Pass,
    Fail(Box<Counterexample<T>>),
    /// More trials were discarded than the configuration allows.
    GaveUp { discards: usize },
    /// A generator could not produce a value. Not a property failure.
    Exhausted(GenerationExhausted),
    /// The time budget ran out before `test_limit` trials were executed.
    OutOfTime { budget: Duration },
    InsufficientCoverage {
        label: String,
        expected: f64,
        actual: f64,
    },
}

/// Summary of one property run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<T> {
    /// Trials that were executed and not discarded.
    pub tests_run: usize,
    pub discards: usize,
    pub outcome: RunOutcome<T>,
    /// Label counts over every executed trial.
    pub classification: Classification,
    pub property_name: Option<String>,
}

impl<T> Report<T> {
    pub fn is_pass(&self) -> bool {
        matches!(self.outcome, RunOutcome::Pass)
    }

    pub fn counterexample(&self) -> Option<&Counterexample<T>> {
        match &self.outcome {
            RunOutcome::Fail(counterexample) => Some(counterexample),
            _ => None,
        }
    }

    /// Convert anything but a pass into a [`PropcheckError`].
    pub fn into_result(self) -> Result<Self>
    where
        T: fmt::Debug,
    {
        match &self.outcome {
            RunOutcome::Pass => Ok(self),
            RunOutcome::Fail(counterexample) => Err(PropcheckError::PropertyFailed {
                counterexample: format!("{:?}", counterexample.value),
                tests_run: self.tests_run,
                shrinks_performed: counterexample.shrinks,
            }),
            RunOutcome::GaveUp { discards } => {
                Err(PropcheckError::TooManyDiscards { limit: *discards })
            }
            RunOutcome::Exhausted(exhausted) => Err((*exhausted).into()),
            RunOutcome::OutOfTime { budget } => Err(PropcheckError::OutOfTime {
                budget: *budget,
                tests_run: self.tests_run,
            }),
            RunOutcome::InsufficientCoverage {
                label,
                expected,
                actual,
            } => Err(PropcheckError::InsufficientCoverage {
                label: label.clone(),
                expected: *expected,
                actual: *actual,
            }),
        }
    }

    /// Panic with the rendered report unless the run passed.
    #[track_caller]
    pub fn assert_pass(&self)
    where
        T: fmt::Debug,
    {
        if !self.is_pass() {
            panic!("\n{self}");
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.property_name.as_deref().unwrap_or("property");

        match &self.outcome {
            RunOutcome::Pass => {
                writeln!(f, "  ✓ {} passed {} tests.", name, self.tests_run)?;
            }
            RunOutcome::Fail(counterexample) => {
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    name, self.tests_run, counterexample.shrinks
                )?;

                if !counterexample.shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in &counterexample.shrink_steps {
                        match (&step.variable_name, step.step) {
                            (Some(var_name), n) => writeln!(
                                f,
                                "      │ forAll {} = {} -- {}",
                                n, step.counterexample, var_name
                            )?,
                            (None, 0) => writeln!(f, "      │ Original: {}", step.counterexample)?,
                            (None, n) => {
                                writeln!(f, "      │ Step {}: {}", n, step.counterexample)?
                            }
                        }
                    }
                    writeln!(f)?;
                }

                if let Some(message) = &counterexample.message {
                    writeln!(f, "    === {} ===", message)?;
                }
                if !counterexample.labels.is_empty() {
                    writeln!(f, "    Labels: {}", counterexample.labels.join(", "))?;
                }
                writeln!(f, "    Minimal counterexample: {:?}", counterexample.value)?;
                writeln!(
                    f,
                    "    Replay with {} at {}",
                    counterexample.seed, counterexample.size
                )?;
            }
            RunOutcome::GaveUp { discards } => {
                writeln!(f, "  ⚐ {} gave up after {} discards", name, discards)?;
            }
            RunOutcome::Exhausted(exhausted) => {
                writeln!(
                    f,
                    "  ⚐ {} stopped after {} tests: {}",
                    name, self.tests_run, exhausted
                )?;
            }
            RunOutcome::OutOfTime { budget } => {
                writeln!(
                    f,
                    "  ⚐ {} stopped after {} tests: time budget of {:?} ran out",
                    name, self.tests_run, budget
                )?;
            }
            RunOutcome::InsufficientCoverage {
                label,
                expected,
                actual,
            } => {
                writeln!(
                    f,
                    "  ✗ {} covered {:?} in {:.1}% of {} tests, expected {:.1}%.",
                    name, label, actual, self.tests_run, expected
                )?;
            }
        }

        if !self.classification.is_empty() {
            writeln!(f)?;
            write!(f, "{}", self.classification)?;
        }
        Ok(())
    }
}
