//! Category-optimization rule family: spend below the peer baseline in a
//! deductible category.

use std::collections::BTreeMap;

use serde_json::json;
use taxlens_core::config::{DeductionRules, TaxBrackets, TipTunables};
use taxlens_core::models::{Priority, Tip, TipType};
use taxlens_patterns::PatternBundle;

use crate::context::UserContext;

/// At most one tip per deductible category where the user spends less than
/// the configured fraction of the peer (same occupation) average.
///
/// No demographic row or no occupation baseline turns this into a no-op.
pub fn emit(
    ctx: &UserContext<'_>,
    patterns: &PatternBundle,
    rules: &DeductionRules,
    brackets: &TaxBrackets,
    tunables: &TipTunables,
) -> Vec<Tip> {
    let Some(user) = ctx.user else {
        return Vec::new();
    };
    let Some(peer_averages) = patterns
        .demographic_patterns
        .avg_category_spend_by_occupation
        .get(&user.occupation_category)
    else {
        return Vec::new();
    };

    let mut tips = Vec::new();
    for rule in rules.iter() {
        let Some(&peer_average) = peer_averages.get(&rule.category) else {
            continue;
        };
        if peer_average <= 0.0 {
            continue;
        }
        let user_spend = ctx.category_spend(&rule.category);
        if user_spend >= peer_average * tunables.peer_spend_threshold {
            continue;
        }

        let gap = peer_average - user_spend;
        let potential_deduction = gap * rule.deduction_rate;
        let potential_savings = potential_deduction * brackets.marginal_rate(ctx.income());

        let mut evidence = BTreeMap::new();
        evidence.insert("user_spending".to_string(), json!(user_spend));
        evidence.insert("peer_average".to_string(), json!(peer_average));
        evidence.insert(
            "occupation".to_string(),
            json!(user.occupation_category.clone()),
        );

        tips.push(Tip {
            tip_id: String::new(),
            tip_type: TipType::CategoryOptimization,
            category: rule.category.clone(),
            title: format!("Consider Increasing {} Investments", rule.category),
            description: format!(
                "Similar {} professionals typically spend €{peer_average:.2} on {}. You spent \
                 €{user_spend:.2}. Increasing investments in this area could provide tax benefits.",
                user.occupation_category.to_lowercase(),
                rule.category.to_lowercase(),
            ),
            action_items: vec![
                format!(
                    "Research {} opportunities relevant to your profession",
                    rule.category.to_lowercase()
                ),
                "Set aside budget for tax-deductible expenses".to_string(),
                "Track all related expenses carefully".to_string(),
            ],
            potential_savings,
            confidence: tunables.category_confidence,
            priority: Priority::Low,
            evidence,
        });
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taxlens_core::models::{Transaction, User};
    use taxlens_patterns::PatternMiner;

    fn tx(user: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            user_id: user.to_string(),
            category: category.to_string(),
            amount,
            vendor: "v".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        }
    }

    fn engineer(id: &str) -> User {
        User {
            user_id: id.to_string(),
            occupation_category: "Engineer".to_string(),
            region: "Berlin".to_string(),
            age_range: "30-39".to_string(),
            family_status: "single".to_string(),
        }
    }

    #[test]
    fn under_spender_gets_a_tip() {
        let rules = DeductionRules::standard().unwrap();
        let brackets = TaxBrackets::standard().unwrap();
        let txs = vec![
            tx("u1", "Professional Development", 100.0),
            tx("u2", "Professional Development", 2000.0),
            tx("u3", "Professional Development", 1900.0),
        ];
        let users = vec![engineer("u1"), engineer("u2"), engineer("u3")];
        let patterns = PatternMiner::mine(&txs, &users, &[], &[], &[], &rules);

        let ctx = UserContext::new("u1", &txs, &users, &[]);
        let tips = emit(&ctx, &patterns, &rules, &brackets, &TipTunables::default());
        assert_eq!(tips.len(), 1);
        let tip = &tips[0];
        assert_eq!(tip.tip_type, TipType::CategoryOptimization);
        // Peer average (100 + 2000 + 1900) / 3; gap to that average at
        // rate 1.0 in the 0.37 default bracket.
        let peer_average = 4000.0 / 3.0;
        let expected = (peer_average - 100.0) * 0.37;
        assert!((tip.potential_savings - expected).abs() < 1e-9);
    }

    #[test]
    fn no_demographic_row_is_a_noop() {
        let rules = DeductionRules::standard().unwrap();
        let brackets = TaxBrackets::standard().unwrap();
        let txs = vec![tx("u1", "Medical", 10.0), tx("u2", "Medical", 900.0)];
        let users = vec![engineer("u2")];
        let patterns = PatternMiner::mine(&txs, &users, &[], &[], &[], &rules);
        let ctx = UserContext::new("u1", &txs, &users, &[]);
        assert!(emit(&ctx, &patterns, &rules, &brackets, &TipTunables::default()).is_empty());
    }

    #[test]
    fn spender_at_peer_level_gets_nothing() {
        let rules = DeductionRules::standard().unwrap();
        let brackets = TaxBrackets::standard().unwrap();
        let txs = vec![
            tx("u1", "Medical", 1000.0),
            tx("u2", "Medical", 1000.0),
        ];
        let users = vec![engineer("u1"), engineer("u2")];
        let patterns = PatternMiner::mine(&txs, &users, &[], &[], &[], &rules);
        let ctx = UserContext::new("u1", &txs, &users, &[]);
        assert!(emit(&ctx, &patterns, &rules, &brackets, &TipTunables::default()).is_empty());
    }
}
