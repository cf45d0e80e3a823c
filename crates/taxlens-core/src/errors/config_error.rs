/// Static configuration table errors, detected once at construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("deduction rule table is empty")]
    EmptyRules,

    #[error("deduction rate {rate} for {category:?} outside (0, 1]")]
    InvalidDeductionRate { category: String, rate: f64 },

    #[error("duplicate deduction category {category:?}")]
    DuplicateCategory { category: String },

    #[error("annual cap {cap} for {category:?} below minimum amount {min}")]
    CapBelowMinimum { category: String, cap: f64, min: f64 },

    #[error("tax bracket table is empty")]
    EmptyBrackets,

    #[error("first tax bracket must start at 0, found {min}")]
    UnanchoredBrackets { min: f64 },

    #[error("tax brackets not contiguous: expected next bracket at {expected}, found {found}")]
    BracketGap { expected: f64, found: f64 },

    #[error("only the last tax bracket may be unbounded")]
    UnboundedInnerBracket,

    #[error("last tax bracket must be unbounded")]
    BoundedLastBracket,

    #[error("marginal rate {rate} outside [0, 1]")]
    InvalidMarginalRate { rate: f64 },
}
