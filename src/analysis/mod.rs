//! Breakdown aggregation modules.
//!
//! The aggregator holds the pure grouping/derivation logic; geo holds the
//! static coordinate table backing the regional map output.

pub mod aggregator;
pub mod geo;

pub use aggregator::*;
