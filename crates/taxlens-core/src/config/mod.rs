mod deduction_rules;
mod tax_brackets;
mod tunables;

pub use deduction_rules::{DeductionRule, DeductionRules};
pub use tax_brackets::{TaxBracket, TaxBrackets};
pub use tunables::TipTunables;
