//! Property definitions and the trial runner.

use crate::classify::Classification;
use crate::report::{Counterexample, Report, RunOutcome};
use crate::shrink::Shrinker;
use crate::{data::*, error::*, gen::*};
use std::fmt::{Debug, Display};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Verdict of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    /// The input did not meet a precondition; the trial does not count.
    Discard,
}

/// The result of checking one generated input.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: Status,
    pub labels: Vec<String>,
    pub collected: Vec<(String, f64)>,
    pub message: Option<String>,
}

impl Outcome {
    fn with_status(status: Status) -> Self {
        Outcome {
            status,
            labels: Vec::new(),
            collected: Vec::new(),
            message: None,
        }
    }

    pub fn pass() -> Self {
        Self::with_status(Status::Pass)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Outcome {
            message: Some(message.into()),
            ..Self::with_status(Status::Fail)
        }
    }

    pub fn discard() -> Self {
        Self::with_status(Status::Discard)
    }

    /// Run `check` only when `condition` holds, discarding the trial otherwise.
    pub fn implies<O, F>(condition: bool, check: F) -> Self
    where
        O: Into<Outcome>,
        F: FnOnce() -> O,
    {
        if condition {
            check().into()
        } else {
            Outcome::discard()
        }
    }

    /// Pass when `left == right`, otherwise fail showing both sides.
    pub fn equal<A>(left: &A, right: &A) -> Self
    where
        A: PartialEq + Debug + ?Sized,
    {
        if left == right {
            Outcome::pass()
        } else {
            Outcome::fail(format!("{left:?} != {right:?}"))
        }
    }

    /// Combine two outcomes: fails if either fails, discards if either
    /// discards, and keeps the labels and collections of both.
    pub fn and(mut self, other: Outcome) -> Self {
        self.status = match (self.status, other.status) {
            (Status::Fail, _) | (_, Status::Fail) => Status::Fail,
            (Status::Discard, _) | (_, Status::Discard) => Status::Discard,
            _ => Status::Pass,
        };
        if self.message.is_none() {
            self.message = other.message;
        }
        self.labels.extend(other.labels);
        self.collected.extend(other.collected);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Attach `label` when `condition` holds.
    pub fn classify(self, condition: bool, label: impl Into<String>) -> Self {
        if condition {
            self.label(label)
        } else {
            self
        }
    }

    /// Label the trial with the display form of `value`.
    pub fn collect_value(self, value: impl Display) -> Self {
        self.label(value.to_string())
    }

    /// Record a raw numeric observation under `name`.
    pub fn collect(mut self, name: impl Into<String>, value: f64) -> Self {
        self.collected.push((name.into(), value));
        self
    }

    pub fn is_failure(&self) -> bool {
        self.status == Status::Fail
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::pass()
        } else {
            Outcome::fail("condition was false")
        }
    }
}

impl<E: Display> From<std::result::Result<(), E>> for Outcome {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::pass(),
            Err(error) => Outcome::fail(error.to_string()),
        }
    }
}

type ClassificationFn<T> = Box<dyn Fn(&T) -> bool>;
type CollectionFn<T> = Box<dyn Fn(&T) -> f64>;

/// A minimum share of trials that must carry a label.
#[derive(Debug, Clone, PartialEq)]
struct CoverageRequirement {
    label: String,
    minimum_percent: f64,
}

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: Box<dyn Fn(&T) -> Outcome>,
    variable_name: Option<String>,
    classifications: Vec<(String, ClassificationFn<T>)>,
    collections: Vec<(String, CollectionFn<T>)>,
    coverage: Vec<CoverageRequirement>,
}

impl<T> Property<T>
where
    T: 'static + Debug + Clone,
{
    /// Create a new property from a generator and test function.
    pub fn new<F, O>(generator: Gen<T>, test_function: F) -> Self
    where
        F: Fn(&T) -> O + 'static,
        O: Into<Outcome>,
    {
        Property {
            generator,
            test_function: Box::new(move |input| test_function(input).into()),
            variable_name: None,
            classifications: Vec::new(),
            collections: Vec::new(),
            coverage: Vec::new(),
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::new(generator, move |input: &T| {
            if condition(input) {
                Outcome::pass()
            } else {
                Outcome::fail("Boolean Condition")
            }
        })
    }

    /// Create a property that checks a boolean condition with a named variable.
    pub fn for_all_named<F>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let mut property = Property::for_all(generator, condition);
        property.variable_name = Some(variable_name.to_string());
        property
    }

    /// Name the generated variable in shrink progressions.
    pub fn named(mut self, variable_name: &str) -> Self {
        self.variable_name = Some(variable_name.to_string());
        self
    }

    /// Add a classification to categorize test inputs.
    pub fn classify<F>(mut self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.classifications.push((name.to_string(), Box::new(predicate)));
        self
    }

    /// Add a collection to gather numerical statistics from test inputs.
    pub fn collect<F>(mut self, name: &str, extractor: F) -> Self
    where
        F: Fn(&T) -> f64 + 'static,
    {
        self.collections.push((name.to_string(), Box::new(extractor)));
        self
    }

    /// Classify inputs with `predicate` and require at least
    /// `minimum_percent` of the trials to carry `name`.
    pub fn cover<F>(self, minimum_percent: f64, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.classify(name, predicate)
            .require_coverage(minimum_percent, name)
    }

    /// Require a label, however it is attached, on `minimum_percent` of trials.
    pub fn require_coverage(mut self, minimum_percent: f64, label: &str) -> Self {
        self.coverage.push(CoverageRequirement {
            label: label.to_string(),
            minimum_percent,
        });
        self
    }

    /// Run this property with the given configuration.
    pub fn run(&self, config: &Config) -> Result<Report<T>> {
        self.run_with_context(config, None)
    }

    /// Run this property with the given configuration and a display name.
    pub fn run_with_context(
        &self,
        config: &Config,
        property_name: Option<&str>,
    ) -> Result<Report<T>> {
        config.validate()?;

        let started = Instant::now();
        let mut seed = config.initial_seed();
        let mut classification = Classification::new();
        let mut tests_run = 0;
        let mut discards = 0;

        debug!(
            property = property_name.unwrap_or("property"),
            %seed,
            tests = config.test_limit,
            "starting property run"
        );

        let report = |outcome, tests_run, discards, classification| Report {
            tests_run,
            discards,
            outcome,
            classification,
            property_name: property_name.map(str::to_string),
        };

        while tests_run < config.test_limit {
            if let Some(budget) = config.time_budget {
                if started.elapsed() >= budget {
                    warn!(tests_run, ?budget, "time budget exhausted, stopping early");
                    return Ok(report(
                        RunOutcome::OutOfTime { budget },
                        tests_run,
                        discards,
                        classification,
                    ));
                }
            }

            let size = Size::for_trial(
                tests_run,
                config.test_limit,
                config.start_size,
                config.size_limit,
            );
            let (trial_seed, next_seed) = seed.split();
            seed = next_seed;

            let tree = match self.generator.generate(size, trial_seed) {
                Ok(tree) => tree,
                Err(exhausted) => {
                    warn!(tests_run, %exhausted, "generator exhausted");
                    return Ok(report(
                        RunOutcome::Exhausted(exhausted),
                        tests_run,
                        discards,
                        classification,
                    ));
                }
            };

            let outcome = (self.test_function)(&tree.value);
            if outcome.status == Status::Discard {
                discards += 1;
                if discards > config.discard_limit {
                    warn!(discards, "too many discarded trials");
                    return Ok(report(
                        RunOutcome::GaveUp {
                            discards: config.discard_limit,
                        },
                        tests_run,
                        discards,
                        classification,
                    ));
                }
                continue;
            }

            let labels = self.trial_labels(&tree.value, &outcome);
            if let Some(sink) = &config.label_sink {
                sink.record(tests_run, &labels);
            }
            classification.record_trial(&labels);
            self.collect_statistics(&tree.value, &outcome, &mut classification);
            tests_run += 1;

            if outcome.is_failure() {
                info!(tests_run, %trial_seed, %size, "property failed, shrinking");
                let counterexample = self.shrink(tree, outcome, trial_seed, size, config);
                return Ok(report(
                    RunOutcome::Fail(Box::new(counterexample)),
                    tests_run,
                    discards,
                    classification,
                ));
            }
        }

        let outcome = self.check_coverage(&classification);
        debug!(tests_run, discards, "property run finished");
        Ok(report(outcome, tests_run, discards, classification))
    }

    /// Replay a single trial from a recorded size and seed.
    ///
    /// The counterexample of a failed run carries both, so a failure can be
    /// reproduced without re-running the trials that preceded it.
    pub fn recheck(&self, config: &Config, size: Size, seed: Seed) -> Result<Report<T>> {
        let mut classification = Classification::new();
        let property_name = None;

        let tree = match self.generator.generate(size, seed) {
            Ok(tree) => tree,
            Err(exhausted) => {
                return Ok(Report {
                    tests_run: 0,
                    discards: 0,
                    outcome: RunOutcome::Exhausted(exhausted),
                    classification,
                    property_name,
                })
            }
        };

        let outcome = (self.test_function)(&tree.value);
        if outcome.status == Status::Discard {
            return Ok(Report {
                tests_run: 0,
                discards: 1,
                outcome: RunOutcome::GaveUp { discards: 1 },
                classification,
                property_name,
            });
        }

        classification.record_trial(self.trial_labels(&tree.value, &outcome));
        self.collect_statistics(&tree.value, &outcome, &mut classification);
        let outcome = if outcome.is_failure() {
            RunOutcome::Fail(Box::new(self.shrink(tree, outcome, seed, size, config)))
        } else {
            RunOutcome::Pass
        };

        Ok(Report {
            tests_run: 1,
            discards: 0,
            outcome,
            classification,
            property_name,
        })
    }

    fn trial_labels(&self, value: &T, outcome: &Outcome) -> Vec<String> {
        self.classifications
            .iter()
            .filter(|(_, predicate)| predicate(value))
            .map(|(name, _)| name.clone())
            .chain(outcome.labels.iter().cloned())
            .collect()
    }

    fn collect_statistics(&self, value: &T, outcome: &Outcome, statistics: &mut Classification) {
        for (name, extractor) in &self.collections {
            statistics.record_collection(name, extractor(value));
        }
        for (name, value) in &outcome.collected {
            statistics.record_collection(name, *value);
        }
    }

    fn shrink(
        &self,
        tree: crate::tree::Tree<T>,
        outcome: Outcome,
        seed: Seed,
        size: Size,
        config: &Config,
    ) -> Counterexample<T> {
        let check = |value: &T| (self.test_function)(value);
        let shrunk = Shrinker::new(&check, config.shrink_limit)
            .with_variable_name(self.variable_name.as_deref())
            .run(tree, outcome);

        info!(shrinks = shrunk.shrinks, value = ?shrunk.value, "minimal counterexample");

        let labels = self.trial_labels(&shrunk.value, &shrunk.outcome);
        Counterexample {
            value: shrunk.value,
            labels,
            message: shrunk.outcome.message,
            seed,
            size,
            shrinks: shrunk.shrinks,
            shrink_steps: shrunk.steps,
        }
    }

    fn check_coverage(&self, classification: &Classification) -> RunOutcome<T> {
        for requirement in &self.coverage {
            let actual = classification.fraction(&requirement.label) * 100.0;
            if actual < requirement.minimum_percent {
                warn!(label = %requirement.label, actual, "insufficient coverage");
                return RunOutcome::InsufficientCoverage {
                    label: requirement.label.clone(),
                    expected: requirement.minimum_percent,
                    actual,
                };
            }
        }
        RunOutcome::Pass
    }
}

/// Create a property for a generator and test function.
pub fn property<T, F, O>(generator: Gen<T>, test_function: F) -> Property<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> O + 'static,
    O: Into<Outcome>,
{
    Property::new(generator, test_function)
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all_named(generator, variable_name, condition)
}
