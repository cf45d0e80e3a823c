//! Seasonal patterns: monthly and quarterly spend, year-end behavior.
//!
//! The year-end figures (December vs November charitable giving, Q4
//! medical spend) feed the tip generator's timing rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taxlens_core::models::Transaction;

use crate::stats::mean;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCategorySpend {
    pub month: u32,
    pub category: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuarterAgg {
    pub sum: f64,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearEndPatterns {
    pub december_charitable_donations: f64,
    pub november_charitable_donations: f64,
    pub medical_q4_spending: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonalPatterns {
    pub monthly_category_spending: Vec<MonthlyCategorySpend>,
    pub quarterly_patterns: BTreeMap<u32, QuarterAgg>,
    pub year_end_patterns: YearEndPatterns,
}

pub fn analyze(transactions: &[Transaction]) -> SeasonalPatterns {
    if transactions.is_empty() {
        return SeasonalPatterns::default();
    }

    let mut monthly: BTreeMap<(u32, &str), f64> = BTreeMap::new();
    for tx in transactions {
        *monthly.entry((tx.month(), tx.category.as_str())).or_default() += tx.amount;
    }
    let monthly_category_spending = monthly
        .into_iter()
        .map(|((month, category), total_amount)| MonthlyCategorySpend {
            month,
            category: category.to_string(),
            total_amount,
        })
        .collect();

    let mut quarterly_patterns: BTreeMap<u32, QuarterAgg> = BTreeMap::new();
    {
        let mut amounts: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for tx in transactions {
            amounts.entry(tx.quarter()).or_default().push(tx.amount);
        }
        for (quarter, values) in amounts {
            quarterly_patterns.insert(
                quarter,
                QuarterAgg {
                    sum: values.iter().sum(),
                    mean: mean(&values),
                    count: values.len(),
                },
            );
        }
    }

    let sum_where = |pred: &dyn Fn(&Transaction) -> bool| -> f64 {
        transactions.iter().filter(|t| pred(t)).map(|t| t.amount).sum()
    };
    let year_end_patterns = YearEndPatterns {
        december_charitable_donations: sum_where(&|t| {
            t.month() == 12 && t.category == "Charitable Donations"
        }),
        november_charitable_donations: sum_where(&|t| {
            t.month() == 11 && t.category == "Charitable Donations"
        }),
        medical_q4_spending: sum_where(&|t| t.quarter() == 4 && t.category == "Medical"),
    };

    SeasonalPatterns {
        monthly_category_spending,
        quarterly_patterns,
        year_end_patterns,
    }
}
