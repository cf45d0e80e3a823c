//! # taxlens-core
//!
//! Foundation crate for the taxlens engine.
//! Defines the input record types, the static deduction-rule and tax-bracket
//! tables, tip/report models, errors, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::{DeductionRule, DeductionRules, TaxBracket, TaxBrackets, TipTunables};
pub use errors::{ConfigError, TaxlensError, TaxlensResult};
pub use models::{
    ClusterSummary, ClusteringOutcome, PayslipRecord, Priority, ReceiptRecord, TaxFiling, Tip,
    TipReport, TipType, Transaction, User,
};
