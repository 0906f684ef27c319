//! Property-based testing with explicit generators, and a tour of it.
//!
//! The library half re-exports `propcheck-core`: generators, shrinking,
//! classification and the trial runner. The tour half holds small systems
//! under test, each with the generators that exercise its input partitions:
//!
//! - [`arith`]: integer addition laws.
//! - [`coin`]: bounded coin arithmetic with an overflow cap.
//! - [`email`]: extracting addresses from text.
//! - [`search`]: narrowing search results by adding terms.
//! - [`purchase_order`]: a schema-validated XML round trip.
//!
//! ```rust
//! use propcheck::*;
//!
//! let prop = for_all(Gen::int_range(-100, 100), |&x| arith::add(x.into(), 0) == i64::from(x));
//! assert!(prop.run(&Config::default()).unwrap().is_pass());
//! ```

// Lets the derive macro refer to `::propcheck` from inside this crate.
extern crate self as propcheck;

pub use propcheck_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use propcheck_derive::Arbitrary;

pub mod arith;
pub mod coin;
pub mod email;
pub mod purchase_order;
pub mod search;
