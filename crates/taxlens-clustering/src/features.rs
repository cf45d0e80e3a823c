//! Feature matrix builder: one numeric row per user with transactions.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use taxlens_core::constants::MIN_USERS_FOR_FEATURES;
use taxlens_core::models::{TaxFiling, Transaction};

/// Round to two decimals, matching the precision of the filing-derived
/// rate columns downstream consumers see.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Numeric feature rows for clustering. `user_ids` is parallel to `rows`
/// and is the only non-numeric column, kept aside for joining results back.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureMatrix {
    pub user_ids: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Number of users (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Column values for a named column, row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}

/// Build the per-user feature matrix from transactions and tax filings.
///
/// Returns `None` when fewer than 2 users have transactions — too little
/// data to segment, and the caller skips clustering.
pub fn build_feature_matrix(
    transactions: &[Transaction],
    filings: &[TaxFiling],
) -> Option<FeatureMatrix> {
    let mut by_user: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_user.entry(tx.user_id.as_str()).or_default().push(tx);
    }
    if by_user.len() < MIN_USERS_FOR_FEATURES {
        return None;
    }

    let categories: BTreeSet<&str> = transactions.iter().map(|t| t.category.as_str()).collect();

    let mut columns = vec![
        "total_spending".to_string(),
        "avg_transaction".to_string(),
        "transaction_count".to_string(),
        "category_diversity".to_string(),
    ];
    columns.extend(categories.iter().map(|c| format!("share_{c}")));
    columns.extend([
        "total_income".to_string(),
        "total_deductions".to_string(),
        "deduction_rate".to_string(),
        "spending_rate".to_string(),
    ]);

    let mut user_ids = Vec::with_capacity(by_user.len());
    let mut rows = Vec::with_capacity(by_user.len());

    for (user_id, txs) in &by_user {
        let total_spending: f64 = txs.iter().map(|t| t.amount).sum();
        let count = txs.len();
        let avg = total_spending / count as f64;
        let diversity = txs
            .iter()
            .map(|t| t.category.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let mut row = vec![
            round2(total_spending),
            round2(avg),
            count as f64,
            diversity as f64,
        ];

        // Per-category spend as a fraction of this user's total; missing
        // categories stay at 0.
        for category in &categories {
            let in_category: f64 = txs
                .iter()
                .filter(|t| t.category.as_str() == *category)
                .map(|t| t.amount)
                .sum();
            let share = if total_spending > 0.0 {
                in_category / total_spending
            } else {
                0.0
            };
            row.push(share);
        }

        // First-match filing join; absent filing contributes zeros.
        let filing = filings.iter().find(|f| f.user_id == *user_id);
        let total_income = filing.map(|f| f.total_income).unwrap_or(0.0);
        let total_deductions = filing.map(|f| f.total_deductions).unwrap_or(0.0);
        let deduction_rate = if total_income > 0.0 {
            round2(total_deductions / total_income * 100.0)
        } else {
            0.0
        };
        let spending_rate = if total_income > 0.0 {
            round2(total_spending / total_income * 100.0)
        } else {
            0.0
        };
        row.extend([total_income, total_deductions, deduction_rate, spending_rate]);

        user_ids.push(user_id.to_string());
        rows.push(row);
    }

    Some(FeatureMatrix {
        user_ids,
        columns,
        rows,
    })
}

/// Standardize every column to zero mean and unit variance. Constant
/// columns are left at 0 so they never produce NaN distances.
pub fn standardize(matrix: &FeatureMatrix) -> Vec<Vec<f64>> {
    let n = matrix.rows.len();
    if n == 0 {
        return Vec::new();
    }
    let dims = matrix.columns.len();
    let mut means = vec![0.0; dims];
    for row in &matrix.rows {
        for (j, v) in row.iter().enumerate() {
            means[j] += v;
        }
    }
    for mean in &mut means {
        *mean /= n as f64;
    }

    let mut stds = vec![0.0; dims];
    for row in &matrix.rows {
        for (j, v) in row.iter().enumerate() {
            stds[j] += (v - means[j]).powi(2);
        }
    }
    for std in &mut stds {
        *std = (*std / n as f64).sqrt();
    }

    matrix
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, v)| {
                    if stds[j] > 0.0 {
                        (v - means[j]) / stds[j]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}
