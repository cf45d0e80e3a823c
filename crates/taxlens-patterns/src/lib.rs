//! # taxlens-patterns
//!
//! Pattern miner: converts the raw input tables into seven independent,
//! declaratively named pattern families. All families are pure aggregations;
//! a missing upstream table degrades that family to an empty result and
//! never aborts the others.
//!
//! | Family | Source tables |
//! |--------|---------------|
//! | Transaction | transactions |
//! | Demographic | transactions + users + filings |
//! | Tax optimization | transactions + filings |
//! | Seasonal | transactions |
//! | Document | OCR receipt/payslip records |
//! | Clustering | feature matrix via taxlens-clustering |
//! | Deduction opportunities | transactions + deduction rules |
//!
//! The resulting [`PatternBundle`] is the aggregation boundary: everything
//! downstream reads only this plus the original per-user slices.

pub mod families;
pub mod miner;
pub(crate) mod stats;

pub use miner::{PatternBundle, PatternMiner};
