//! # taxlens-clustering
//!
//! Groups users into behavioral segments from their transaction and tax
//! filing history.
//!
//! ## Pipeline
//!
//! 1. Feature matrix: one numeric row per user with transactions
//!    (spending aggregates, per-category shares, filing-derived rates).
//! 2. Z-score standardization (spending magnitudes and rates live on
//!    incomparable scales).
//! 3. Seeded multi-start k-means with k = min(5, users − 1).
//! 4. Per-cluster summaries (size, mean spending, mean deduction rate,
//!    dominant occupation).
//!
//! Fewer than 3 usable rows skips clustering entirely — no partial or
//! degenerate clusters are ever produced.

pub mod engine;
pub mod features;
pub mod kmeans;

pub use engine::ClusteringEngine;
pub use features::FeatureMatrix;
