//! Per-user view over the shared input tables.

use taxlens_core::constants::DEFAULT_INCOME;
use taxlens_core::models::{TaxFiling, Transaction, User};

/// Read-only slice of the input tables for one target user. All joins are
/// first-match; anything missing stays `None` and the affected rules
/// degrade to no-ops.
pub struct UserContext<'a> {
    pub user_id: &'a str,
    pub user: Option<&'a User>,
    pub transactions: Vec<&'a Transaction>,
    pub filing: Option<&'a TaxFiling>,
}

impl<'a> UserContext<'a> {
    pub fn new(
        user_id: &'a str,
        transactions: &'a [Transaction],
        users: &'a [User],
        filings: &'a [TaxFiling],
    ) -> Self {
        Self {
            user_id,
            user: users.iter().find(|u| u.user_id == user_id),
            transactions: transactions
                .iter()
                .filter(|t| t.user_id == user_id)
                .collect(),
            filing: filings.iter().find(|f| f.user_id == user_id),
        }
    }

    /// Filed income, or the engine-wide default when no filing exists.
    pub fn income(&self) -> f64 {
        self.filing.map(|f| f.total_income).unwrap_or(DEFAULT_INCOME)
    }

    /// Recorded deductions, 0 without a filing.
    pub fn recorded_deductions(&self) -> f64 {
        self.filing.map(|f| f.total_deductions).unwrap_or(0.0)
    }

    /// Total spend in one category.
    pub fn category_spend(&self, category: &str) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .sum()
    }

    /// Transactions in one category.
    pub fn category_transactions(&self, category: &str) -> Vec<&'a Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .copied()
            .collect()
    }
}
