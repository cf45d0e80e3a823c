//! Tax-optimization patterns: deduction gaps and efficiency ratios.

use serde::{Deserialize, Serialize};
use taxlens_core::config::DeductionRules;
use taxlens_core::models::{TaxFiling, Transaction};

use crate::stats::{mean, sample_std};

/// One filing compared against that user's deductible spend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDeductionGap {
    pub user_id: String,
    /// Total spend in deductible categories (left join, missing -> 0).
    pub potential_deductions: f64,
    pub total_deductions: f64,
    /// potential - recorded; positive means deductions were likely missed.
    pub deduction_gap: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionGapAnalysis {
    /// Filings with a positive gap.
    pub users_with_gap: usize,
    pub average_gap: f64,
    pub max_gap: f64,
    /// Sum of gaps restricted to positive ones.
    pub total_missed_deductions: f64,
}

/// Distribution summary over per-user deduction efficiency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxOptimizationPatterns {
    pub user_gaps: Vec<UserDeductionGap>,
    pub deduction_gap_analysis: DeductionGapAnalysis,
    pub deduction_efficiency: EfficiencySummary,
}

pub fn analyze(
    transactions: &[Transaction],
    filings: &[TaxFiling],
    rules: &DeductionRules,
) -> TaxOptimizationPatterns {
    if filings.is_empty() {
        return TaxOptimizationPatterns::default();
    }

    let user_gaps: Vec<UserDeductionGap> = filings
        .iter()
        .map(|filing| {
            let potential: f64 = transactions
                .iter()
                .filter(|t| t.user_id == filing.user_id && rules.is_deductible(&t.category))
                .map(|t| t.amount)
                .sum();
            UserDeductionGap {
                user_id: filing.user_id.clone(),
                potential_deductions: potential,
                total_deductions: filing.total_deductions,
                deduction_gap: potential - filing.total_deductions,
            }
        })
        .collect();

    let gaps: Vec<f64> = user_gaps.iter().map(|g| g.deduction_gap).collect();
    let deduction_gap_analysis = DeductionGapAnalysis {
        users_with_gap: gaps.iter().filter(|g| **g > 0.0).count(),
        average_gap: mean(&gaps),
        max_gap: gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        total_missed_deductions: gaps.iter().filter(|g| **g > 0.0).sum(),
    };

    // Efficiency = recorded deductions as a percentage of income, with the
    // zero-income guard.
    let efficiencies: Vec<f64> = filings
        .iter()
        .map(|f| {
            if f.total_income > 0.0 {
                f.total_deductions / f.total_income * 100.0
            } else {
                0.0
            }
        })
        .collect();
    let deduction_efficiency = EfficiencySummary {
        count: efficiencies.len(),
        mean: mean(&efficiencies),
        std: sample_std(&efficiencies),
        min: efficiencies.iter().copied().fold(f64::INFINITY, f64::min),
        max: efficiencies
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
    };

    TaxOptimizationPatterns {
        user_gaps,
        deduction_gap_analysis,
        deduction_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(user: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            user_id: user.to_string(),
            category: category.to_string(),
            amount,
            vendor: "v".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    fn filing(id: &str, income: f64, deductions: f64) -> TaxFiling {
        TaxFiling {
            user_id: id.to_string(),
            total_income: income,
            total_deductions: deductions,
            refund_amount: 0.0,
        }
    }

    #[test]
    fn no_filings_degrades_to_empty() {
        let rules = DeductionRules::standard().unwrap();
        let patterns = analyze(&[tx("u1", "Medical", 50.0)], &[], &rules);
        assert!(patterns.user_gaps.is_empty());
        assert_eq!(patterns.deduction_gap_analysis.users_with_gap, 0);
    }

    #[test]
    fn gap_counts_deductible_spend_only() {
        let rules = DeductionRules::standard().unwrap();
        let txs = vec![
            tx("u1", "Medical", 800.0),
            tx("u1", "Groceries", 5000.0), // not deductible
        ];
        let filings = vec![filing("u1", 40000.0, 300.0)];
        let patterns = analyze(&txs, &filings, &rules);
        let gap = &patterns.user_gaps[0];
        assert_eq!(gap.potential_deductions, 800.0);
        assert_eq!(gap.deduction_gap, 500.0);
        assert_eq!(patterns.deduction_gap_analysis.users_with_gap, 1);
        assert_eq!(patterns.deduction_gap_analysis.total_missed_deductions, 500.0);
    }

    #[test]
    fn efficiency_guards_zero_income() {
        let rules = DeductionRules::standard().unwrap();
        let filings = vec![filing("u1", 0.0, 1000.0), filing("u2", 50000.0, 5000.0)];
        let patterns = analyze(&[], &filings, &rules);
        assert_eq!(patterns.deduction_efficiency.min, 0.0);
        assert_eq!(patterns.deduction_efficiency.max, 10.0);
        assert_eq!(patterns.deduction_efficiency.count, 2);
    }

    #[test]
    fn users_without_transactions_left_join_to_zero() {
        let rules = DeductionRules::standard().unwrap();
        let filings = vec![filing("u1", 30000.0, 400.0)];
        let patterns = analyze(&[], &filings, &rules);
        assert_eq!(patterns.user_gaps[0].potential_deductions, 0.0);
        assert_eq!(patterns.user_gaps[0].deduction_gap, -400.0);
        assert_eq!(patterns.deduction_gap_analysis.users_with_gap, 0);
    }
}
