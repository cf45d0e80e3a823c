use serde::{Deserialize, Serialize};

/// Current tax filing for a user. At most one per user; joins are
/// first-match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxFiling {
    pub user_id: String,
    pub total_income: f64,
    pub total_deductions: f64,
    pub refund_amount: f64,
}
