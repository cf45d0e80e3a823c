//! Demographic patterns: spending and deduction behavior grouped by
//! occupation, family status, region, and age range.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use taxlens_core::models::{TaxFiling, Transaction, User};

use crate::stats::{mean, sample_std};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpendingAgg {
    pub sum: f64,
    pub mean: f64,
    pub count: usize,
}

/// Deduction and refund statistics for one occupation × family-status cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionStats {
    pub deductions_mean: f64,
    pub deductions_std: f64,
    pub refund_mean: f64,
    pub refund_std: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionalAverages {
    pub avg_income: f64,
    pub avg_deductions: f64,
    pub avg_refund: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeCategorySpend {
    pub age_range: String,
    pub category: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemographicPatterns {
    pub spending_by_occupation: BTreeMap<String, SpendingAgg>,
    /// occupation -> family_status -> deduction/refund stats.
    pub deduction_by_demographics: BTreeMap<String, BTreeMap<String, DeductionStats>>,
    pub regional_patterns: BTreeMap<String, RegionalAverages>,
    pub spending_by_age_category: Vec<AgeCategorySpend>,
    /// occupation -> category -> average spend per user of that occupation.
    /// Peer baseline for the category-optimization tip rule.
    pub avg_category_spend_by_occupation: BTreeMap<String, BTreeMap<String, f64>>,
}

pub fn analyze(
    transactions: &[Transaction],
    users: &[User],
    filings: &[TaxFiling],
) -> DemographicPatterns {
    if users.is_empty() {
        return DemographicPatterns::default();
    }

    let user_by_id: BTreeMap<&str, &User> =
        users.iter().map(|u| (u.user_id.as_str(), u)).collect();

    // Transactions joined to a demographic row.
    let joined: Vec<(&Transaction, &User)> = transactions
        .iter()
        .filter_map(|tx| user_by_id.get(tx.user_id.as_str()).map(|u| (tx, *u)))
        .collect();

    let mut spending_by_occupation: BTreeMap<String, SpendingAgg> = BTreeMap::new();
    {
        let mut amounts: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (tx, user) in &joined {
            amounts
                .entry(user.occupation_category.as_str())
                .or_default()
                .push(tx.amount);
        }
        for (occupation, values) in amounts {
            spending_by_occupation.insert(
                occupation.to_string(),
                SpendingAgg {
                    sum: values.iter().sum(),
                    mean: mean(&values),
                    count: values.len(),
                },
            );
        }
    }

    // Filings joined to a demographic row.
    let filed: Vec<(&TaxFiling, &User)> = filings
        .iter()
        .filter_map(|f| user_by_id.get(f.user_id.as_str()).map(|u| (f, *u)))
        .collect();

    let mut deduction_by_demographics: BTreeMap<String, BTreeMap<String, DeductionStats>> =
        BTreeMap::new();
    {
        let mut cells: BTreeMap<(&str, &str), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for (filing, user) in &filed {
            let cell = cells
                .entry((
                    user.occupation_category.as_str(),
                    user.family_status.as_str(),
                ))
                .or_default();
            cell.0.push(filing.total_deductions);
            cell.1.push(filing.refund_amount);
        }
        for ((occupation, family_status), (deductions, refunds)) in cells {
            deduction_by_demographics
                .entry(occupation.to_string())
                .or_default()
                .insert(
                    family_status.to_string(),
                    DeductionStats {
                        deductions_mean: mean(&deductions),
                        deductions_std: sample_std(&deductions),
                        refund_mean: mean(&refunds),
                        refund_std: sample_std(&refunds),
                    },
                );
        }
    }

    let mut regional_patterns: BTreeMap<String, RegionalAverages> = BTreeMap::new();
    {
        let mut cells: BTreeMap<&str, (Vec<f64>, Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for (filing, user) in &filed {
            let cell = cells.entry(user.region.as_str()).or_default();
            cell.0.push(filing.total_income);
            cell.1.push(filing.total_deductions);
            cell.2.push(filing.refund_amount);
        }
        for (region, (incomes, deductions, refunds)) in cells {
            regional_patterns.insert(
                region.to_string(),
                RegionalAverages {
                    avg_income: mean(&incomes),
                    avg_deductions: mean(&deductions),
                    avg_refund: mean(&refunds),
                },
            );
        }
    }

    let mut spending_by_age_category: Vec<AgeCategorySpend> = Vec::new();
    {
        let mut cells: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for (tx, user) in &joined {
            *cells
                .entry((user.age_range.as_str(), tx.category.as_str()))
                .or_default() += tx.amount;
        }
        spending_by_age_category.extend(cells.into_iter().map(
            |((age_range, category), total_amount)| AgeCategorySpend {
                age_range: age_range.to_string(),
                category: category.to_string(),
                total_amount,
            },
        ));
    }

    // Average per-user category spend within each occupation: the divisor
    // is the number of users of that occupation who transacted at all.
    let mut avg_category_spend_by_occupation: BTreeMap<String, BTreeMap<String, f64>> =
        BTreeMap::new();
    {
        let mut active_users: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for (tx, user) in &joined {
            active_users
                .entry(user.occupation_category.as_str())
                .or_default()
                .insert(tx.user_id.as_str());
            *sums
                .entry((user.occupation_category.as_str(), tx.category.as_str()))
                .or_default() += tx.amount;
        }
        for ((occupation, category), sum) in sums {
            let peers = active_users.get(occupation).map(|s| s.len()).unwrap_or(0);
            if peers > 0 {
                avg_category_spend_by_occupation
                    .entry(occupation.to_string())
                    .or_default()
                    .insert(category.to_string(), sum / peers as f64);
            }
        }
    }

    DemographicPatterns {
        spending_by_occupation,
        deduction_by_demographics,
        regional_patterns,
        spending_by_age_category,
        avg_category_spend_by_occupation,
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
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn user(id: &str, occupation: &str, region: &str, family: &str) -> User {
        User {
            user_id: id.to_string(),
            occupation_category: occupation.to_string(),
            region: region.to_string(),
            age_range: "30-39".to_string(),
            family_status: family.to_string(),
        }
    }

    fn filing(id: &str, income: f64, deductions: f64, refund: f64) -> TaxFiling {
        TaxFiling {
            user_id: id.to_string(),
            total_income: income,
            total_deductions: deductions,
            refund_amount: refund,
        }
    }

    #[test]
    fn no_users_degrades_to_empty() {
        let txs = vec![tx("u1", "Medical", 100.0)];
        let patterns = analyze(&txs, &[], &[]);
        assert!(patterns.spending_by_occupation.is_empty());
        assert!(patterns.regional_patterns.is_empty());
    }

    #[test]
    fn spending_grouped_by_occupation() {
        let txs = vec![
            tx("u1", "Medical", 100.0),
            tx("u2", "Medical", 300.0),
            tx("u3", "Medical", 50.0),
        ];
        let users = vec![
            user("u1", "Engineer", "Berlin", "single"),
            user("u2", "Engineer", "Berlin", "married"),
            user("u3", "Teacher", "Hamburg", "single"),
        ];
        let patterns = analyze(&txs, &users, &[]);
        let engineers = &patterns.spending_by_occupation["Engineer"];
        assert_eq!(engineers.sum, 400.0);
        assert_eq!(engineers.mean, 200.0);
        assert_eq!(engineers.count, 2);
    }

    #[test]
    fn peer_average_divides_by_active_users() {
        let txs = vec![
            tx("u1", "Professional Development", 1000.0),
            tx("u2", "Professional Development", 500.0),
            tx("u2", "Medical", 200.0),
        ];
        let users = vec![
            user("u1", "Engineer", "Berlin", "single"),
            user("u2", "Engineer", "Berlin", "single"),
        ];
        let patterns = analyze(&txs, &users, &[]);
        let avg =
            patterns.avg_category_spend_by_occupation["Engineer"]["Professional Development"];
        assert_eq!(avg, 750.0);
        // Medical was only bought by one of two active engineers.
        assert_eq!(
            patterns.avg_category_spend_by_occupation["Engineer"]["Medical"],
            100.0
        );
    }

    #[test]
    fn regional_averages_from_filings() {
        let users = vec![
            user("u1", "Engineer", "Berlin", "single"),
            user("u2", "Teacher", "Berlin", "single"),
        ];
        let filings = vec![
            filing("u1", 50000.0, 3000.0, 500.0),
            filing("u2", 40000.0, 1000.0, 300.0),
        ];
        let patterns = analyze(&[], &users, &filings);
        let berlin = &patterns.regional_patterns["Berlin"];
        assert_eq!(berlin.avg_income, 45000.0);
        assert_eq!(berlin.avg_deductions, 2000.0);
        assert_eq!(berlin.avg_refund, 400.0);
    }
}
