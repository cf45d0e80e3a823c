//! Transaction patterns: category statistics, monthly variance, top
//! vendors, repeat purchases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taxlens_core::constants::{REPEAT_TRANSACTION_MIN_COUNT, TOP_VENDORS_PER_CATEGORY};
use taxlens_core::models::Transaction;

use crate::stats::{mean, sample_std};

/// Per-category aggregate over all transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub std: f64,
    pub distinct_users: usize,
}

/// A vendor ranked within its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorCount {
    pub vendor: String,
    pub transaction_count: usize,
    pub total_amount: f64,
}

/// A (user, vendor, category) group seen at least twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatPattern {
    pub user_id: String,
    pub vendor: String,
    pub category: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatterns {
    pub category_statistics: BTreeMap<String, CategoryStats>,
    /// Std of monthly spending sums per category, over observed months.
    pub monthly_spending_variance: BTreeMap<String, f64>,
    pub top_vendors_by_category: BTreeMap<String, Vec<VendorCount>>,
    pub repeat_transaction_patterns: Vec<RepeatPattern>,
}

pub fn analyze(transactions: &[Transaction]) -> TransactionPatterns {
    if transactions.is_empty() {
        return TransactionPatterns::default();
    }

    let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_category.entry(tx.category.as_str()).or_default().push(tx);
    }

    let mut category_statistics = BTreeMap::new();
    let mut monthly_spending_variance = BTreeMap::new();
    let mut top_vendors_by_category = BTreeMap::new();

    for (category, txs) in &by_category {
        let amounts: Vec<f64> = txs.iter().map(|t| t.amount).collect();
        let distinct_users = txs
            .iter()
            .map(|t| t.user_id.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        category_statistics.insert(
            category.to_string(),
            CategoryStats {
                count: txs.len(),
                sum: amounts.iter().sum(),
                mean: mean(&amounts),
                std: sample_std(&amounts),
                distinct_users,
            },
        );

        // Monthly sums over months that saw any spend in this category.
        let mut monthly: BTreeMap<u32, f64> = BTreeMap::new();
        for tx in txs {
            *monthly.entry(tx.month()).or_default() += tx.amount;
        }
        let sums: Vec<f64> = monthly.values().copied().collect();
        monthly_spending_variance.insert(category.to_string(), sample_std(&sums));

        // Vendors ranked by transaction count; name breaks ties so the
        // ranking is stable across runs.
        let mut vendor_counts: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for tx in txs {
            let entry = vendor_counts.entry(tx.vendor.as_str()).or_default();
            entry.0 += 1;
            entry.1 += tx.amount;
        }
        let mut ranked: Vec<VendorCount> = vendor_counts
            .into_iter()
            .map(|(vendor, (transaction_count, total_amount))| VendorCount {
                vendor: vendor.to_string(),
                transaction_count,
                total_amount,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.transaction_count
                .cmp(&a.transaction_count)
                .then_with(|| a.vendor.cmp(&b.vendor))
        });
        ranked.truncate(TOP_VENDORS_PER_CATEGORY);
        top_vendors_by_category.insert(category.to_string(), ranked);
    }

    let mut repeats: BTreeMap<(&str, &str, &str), usize> = BTreeMap::new();
    for tx in transactions {
        *repeats
            .entry((tx.user_id.as_str(), tx.vendor.as_str(), tx.category.as_str()))
            .or_default() += 1;
    }
    let repeat_transaction_patterns = repeats
        .into_iter()
        .filter(|(_, frequency)| *frequency >= REPEAT_TRANSACTION_MIN_COUNT)
        .map(|((user_id, vendor, category), frequency)| RepeatPattern {
            user_id: user_id.to_string(),
            vendor: vendor.to_string(),
            category: category.to_string(),
            frequency,
        })
        .collect();

    TransactionPatterns {
        category_statistics,
        monthly_spending_variance,
        top_vendors_by_category,
        repeat_transaction_patterns,
    }
}
