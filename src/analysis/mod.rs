//! Analysis modules.
//!
//! Grouping and ranking of performance records.

pub mod aggregator;

pub use aggregator::*;
