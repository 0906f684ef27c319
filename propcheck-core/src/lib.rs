//! Core functionality for propcheck property-based testing.
//!
//! This crate provides the fundamental building blocks: explicit generators
//! over a splittable seed, rose-tree shrinking, classification of test data
//! and the runner that ties them together.

pub mod arbitrary;
pub mod classify;
pub mod data;
pub mod error;
pub mod gen;
pub mod parallel;
pub mod partition;
pub mod property;
pub mod report;
pub mod shrink;
pub mod tree;

// Re-export the main types
pub use arbitrary::{arbitrary, sample_one, Arbitrary};
pub use classify::*;
pub use data::*;
pub use error::*;
pub use gen::*;
pub use parallel::{run_all, Suite, SuiteReport, SuiteResult};
pub use property::*;
pub use report::*;
pub use shrink::*;
pub use tree::*;
