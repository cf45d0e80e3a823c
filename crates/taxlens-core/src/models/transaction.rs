use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single financial transaction. Owned by the ingestion table; the engine
/// only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: String,
    pub category: String,
    /// Amount in the ledger currency, never negative.
    pub amount: f64,
    pub vendor: String,
    pub transaction_date: NaiveDate,
}

impl Transaction {
    /// Calendar month of the transaction, 1..=12.
    pub fn month(&self) -> u32 {
        self.transaction_date.month()
    }

    /// Calendar quarter, 1..=4.
    pub fn quarter(&self) -> u32 {
        (self.transaction_date.month() - 1) / 3 + 1
    }
}
