//! Search engine over the catalog.
//!
//! Read-only: evaluates a conjunction of optional predicates over a
//! point-in-time snapshot from the catalog store. It never mutates and holds
//! no store locks while filtering.

pub mod engine;

pub use engine::{SearchEngine, SearchFilter};

#[cfg(test)]
mod integration_tests;
