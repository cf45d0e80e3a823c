//! Deduction-opportunity patterns: per-user deductible spend against the
//! static rule table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taxlens_core::config::DeductionRules;
use taxlens_core::models::Transaction;

/// One deductible category a user already spends in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionOpportunity {
    pub current_spending: f64,
    /// current_spending * category rate (uncapped; the tip generator
    /// applies the annual cap when scoring).
    pub potential_deduction: f64,
    pub deduction_rate: f64,
}

/// user_id -> category -> opportunity. Users with no deductible spending
/// contribute no entry at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionOpportunities {
    pub users: BTreeMap<String, BTreeMap<String, DeductionOpportunity>>,
}

impl DeductionOpportunities {
    pub fn for_user(&self, user_id: &str) -> Option<&BTreeMap<String, DeductionOpportunity>> {
        self.users.get(user_id)
    }
}

pub fn analyze(transactions: &[Transaction], rules: &DeductionRules) -> DeductionOpportunities {
    let mut spend: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for tx in transactions {
        if rules.is_deductible(&tx.category) {
            *spend
                .entry((tx.user_id.as_str(), tx.category.as_str()))
                .or_default() += tx.amount;
        }
    }

    let mut users: BTreeMap<String, BTreeMap<String, DeductionOpportunity>> = BTreeMap::new();
    for ((user_id, category), current_spending) in spend {
        if current_spending <= 0.0 {
            continue;
        }
        // is_deductible above guarantees the rule exists.
        let Some(rule) = rules.get(category) else {
            continue;
        };
        users.entry(user_id.to_string()).or_default().insert(
            category.to_string(),
            DeductionOpportunity {
                current_spending,
                potential_deduction: current_spending * rule.deduction_rate,
                deduction_rate: rule.deduction_rate,
            },
        );
    }

    DeductionOpportunities { users }
}
