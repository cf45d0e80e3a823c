//! # taxlens-tips
//!
//! Synthesizes ranked, monetarily quantified tax-optimization tips for one
//! user from the pattern bundle plus that user's raw rows.
//!
//! ## 5 Rule Families
//!
//! | Family | Trigger |
//! |--------|---------|
//! | Deduction | Missed deduction in a deductible category |
//! | Timing | December donation lump sums, irregular medical spend |
//! | Category | Spend below 80% of peer average in a deductible category |
//! | Peer learning | User's cluster averages a deduction rate above 15% |
//! | Compliance | Large deductible transactions, high-income planning |
//!
//! Every family is a pure `(context, patterns) -> Vec<Tip>` function; they
//! run unconditionally in a fixed order and their outputs are concatenated,
//! stable-sorted by `potential_savings * confidence`, and truncated to 10.
//! A missing join target (no filing, no demographics, no cluster) turns the
//! affected family into a no-op, never an error.

pub mod context;
pub mod engine;
pub mod ranking;
pub mod report;
pub mod rules;

pub use context::UserContext;
pub use engine::TipEngine;
