pub mod deduction;
pub mod demographic;
pub mod document;
pub mod seasonal;
pub mod tax_optimization;
pub mod transaction;

pub use deduction::DeductionOpportunities;
pub use demographic::DemographicPatterns;
pub use document::DocumentPatterns;
pub use seasonal::SeasonalPatterns;
pub use tax_optimization::TaxOptimizationPatterns;
pub use transaction::TransactionPatterns;
