//! Running independent properties concurrently.
//!
//! Generators share state through `Rc` and cannot cross threads, so a suite
//! holds `Send` factories instead of properties. Each factory builds its
//! property on the worker thread that runs it.

use crate::{data::*, error::*, property::*};
use std::fmt::{self, Debug};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

type Job = Box<dyn FnOnce(&Config, &str) -> SuiteResult + Send>;

/// A set of named properties run together.
pub struct Suite {
    config: Config,
    thread_count: usize,
    jobs: Vec<(String, Job)>,
}

/// Outcome of one property within a suite.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub name: String,
    pub tests_run: usize,
    /// Seed the property ran with; rerun with `Config::with_seed` to reproduce.
    pub seed: u64,
    pub duration: Duration,
    /// The rendered report.
    pub report: String,
    /// `None` when the property passed.
    pub error: Option<PropcheckError>,
}

impl SuiteResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Results of a whole suite, in the order properties were added.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub results: Vec<SuiteResult>,
    pub duration: Duration,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(SuiteResult::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SuiteResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    pub fn get(&self, name: &str) -> Option<&SuiteResult> {
        self.results.iter().find(|result| result.name == name)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result.report.trim_end())?;
        }
        let failed = self.failures().count();
        write!(
            f,
            "{} properties, {} failed, in {:.2?}",
            self.results.len(),
            failed,
            self.duration
        )
    }
}

impl Suite {
    pub fn new(config: Config) -> Self {
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Suite {
            config,
            thread_count,
            jobs: Vec::new(),
        }
    }

    /// Limit how many properties run at the same time.
    pub fn with_threads(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    /// Add a property built by `factory` on its worker thread.
    pub fn add<T, F>(mut self, name: &str, factory: F) -> Self
    where
        T: Debug + Clone + 'static,
        F: FnOnce() -> Property<T> + Send + 'static,
    {
        let job: Job = Box::new(move |config: &Config, name: &str| {
            let started = Instant::now();
            let seed = config.seed.unwrap_or_default();
            let property = factory();
            match property.run_with_context(config, Some(name)) {
                Ok(report) => SuiteResult {
                    name: name.to_string(),
                    tests_run: report.tests_run,
                    seed,
                    duration: started.elapsed(),
                    report: report.to_string(),
                    error: report.into_result().err(),
                },
                Err(error) => SuiteResult {
                    name: name.to_string(),
                    tests_run: 0,
                    seed,
                    duration: started.elapsed(),
                    report: format!("  ✗ {name}: {error}"),
                    error: Some(error),
                },
            }
        });
        self.jobs.push((name.to_string(), job));
        self
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Run every property, at most `thread_count` at a time.
    ///
    /// Each property gets its own seed split from the suite seed, so a
    /// fixed suite seed reproduces every run.
    pub fn run(self) -> SuiteReport {
        let started = Instant::now();
        let Suite {
            config,
            thread_count,
            jobs,
        } = self;

        let mut seed = config.initial_seed();
        let mut queue = Vec::with_capacity(jobs.len());
        for (index, (name, job)) in jobs.into_iter().enumerate() {
            let (this, next) = seed.split();
            seed = next;
            let property_config = config.clone().with_seed(this.next_u64().0);
            queue.push((index, name, property_config, job));
        }

        let total = queue.len();
        debug!(properties = total, threads = thread_count, "running suite");

        let mut results: Vec<Option<SuiteResult>> = vec![None; total];
        let mut pending = queue.into_iter();

        loop {
            let batch: Vec<_> = pending.by_ref().take(thread_count).collect();
            if batch.is_empty() {
                break;
            }

            thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .into_iter()
                    .map(|(index, name, config, job)| {
                        let seed = config.seed.unwrap_or_default();
                        let handle = scope.spawn({
                            let name = name.clone();
                            move || job(&config, &name)
                        });
                        (index, name, seed, handle)
                    })
                    .collect();

                for (index, name, seed, handle) in handles {
                    let result = handle.join().unwrap_or_else(|_| {
                        warn!(property = %name, "property thread panicked");
                        SuiteResult {
                            report: format!("  ✗ {name} panicked"),
                            name: name.clone(),
                            tests_run: 0,
                            seed,
                            duration: Duration::ZERO,
                            error: Some(PropcheckError::PropertyFailed {
                                counterexample: "thread panicked".to_string(),
                                tests_run: 0,
                                shrinks_performed: 0,
                            }),
                        }
                    });
                    results[index] = Some(result);
                }
            });
        }

        let results = results.into_iter().flatten().collect();

        SuiteReport {
            results,
            duration: started.elapsed(),
        }
    }
}

/// Run named property factories concurrently with one configuration.
pub fn run_all<T, F>(config: Config, properties: Vec<(&str, F)>) -> SuiteReport
where
    T: Debug + Clone + 'static,
    F: FnOnce() -> Property<T> + Send + 'static,
{
    properties
        .into_iter()
        .fold(Suite::new(config), |suite, (name, factory)| {
            suite.add(name, factory)
        })
        .run()
}
