//! Shrinking engine: reduces a failing value to a minimal reproducer.

use crate::error::ShrinkStep;
use crate::property::Outcome;
use crate::tree::Tree;
use std::fmt::Debug;
use tracing::debug;

/// Where shrinking currently stands.
pub enum ShrinkState<T> {
    /// `tree.value` fails with `outcome`; its children are still unexplored.
    Active { tree: Tree<T>, outcome: Outcome },
    /// No child of the last failing value fails (or the shrink limit was hit).
    Minimal { value: T, outcome: Outcome },
}

/// The result of shrinking one counterexample.
#[derive(Debug, Clone)]
pub struct Shrunk<T> {
    pub value: T,
    /// Outcome of the property at `value`, including its labels.
    pub outcome: Outcome,
    pub shrinks: usize,
    pub steps: Vec<ShrinkStep>,
}

/// Drives [`ShrinkState`] transitions for one property.
pub struct Shrinker<'a, T> {
    check: &'a dyn Fn(&T) -> Outcome,
    limit: usize,
    variable_name: Option<&'a str>,
}

impl<'a, T> Shrinker<'a, T>
where
    T: Clone + Debug + 'static,
{
    pub fn new(check: &'a dyn Fn(&T) -> Outcome, limit: usize) -> Self {
        Shrinker {
            check,
            limit,
            variable_name: None,
        }
    }

    pub fn with_variable_name(mut self, name: Option<&'a str>) -> Self {
        self.variable_name = name;
        self
    }

    /// One transition: move to the first failing child, or become minimal.
    ///
    /// Children that pass or discard are skipped.
    pub fn step(&self, state: ShrinkState<T>) -> ShrinkState<T> {
        match state {
            ShrinkState::Active { tree, outcome } => {
                for child in tree.children() {
                    let child_outcome = (self.check)(&child.value);
                    if child_outcome.is_failure() {
                        return ShrinkState::Active {
                            tree: child,
                            outcome: child_outcome,
                        };
                    }
                }
                ShrinkState::Minimal {
                    value: tree.value,
                    outcome,
                }
            }
            minimal => minimal,
        }
    }

    /// Shrink `tree`, whose value fails with `outcome`, until minimal.
    pub fn run(&self, tree: Tree<T>, outcome: Outcome) -> Shrunk<T> {
        let mut steps = vec![self.record(&tree.value, 0)];
        let mut shrinks = 0;
        let mut state = ShrinkState::Active { tree, outcome };

        loop {
            state = match state {
                ShrinkState::Active { tree, outcome } if shrinks >= self.limit => {
                    debug!(limit = self.limit, "shrink limit reached");
                    ShrinkState::Minimal {
                        value: tree.value,
                        outcome,
                    }
                }
                ShrinkState::Minimal { value, outcome } => {
                    return Shrunk {
                        value,
                        outcome,
                        shrinks,
                        steps,
                    };
                }
                active => {
                    let next = self.step(active);
                    if let ShrinkState::Active { tree, .. } = &next {
                        shrinks += 1;
                        debug!(step = shrinks, value = ?tree.value, "accepted shrink");
                        steps.push(self.record(&tree.value, shrinks));
                    }
                    next
                }
            };
        }
    }

    fn record(&self, value: &T, step: usize) -> ShrinkStep {
        ShrinkStep {
            counterexample: format!("{value:?}"),
            step,
            variable_name: self.variable_name.map(str::to_string),
        }
    }
}
