//! Compliance rule family: documentation for large deductible expenses and
//! quarterly planning for high earners. The two checks are independent and
//! both may fire.

use std::collections::BTreeMap;

use serde_json::json;
use taxlens_core::config::{DeductionRules, TipTunables};
use taxlens_core::models::{Priority, Tip, TipType};

use crate::context::UserContext;

pub fn emit(ctx: &UserContext<'_>, rules: &DeductionRules, tunables: &TipTunables) -> Vec<Tip> {
    let mut tips = Vec::new();

    // Large transactions in deductible categories need receipts.
    let large: Vec<_> = ctx
        .transactions
        .iter()
        .filter(|t| t.amount > tunables.large_transaction_threshold && rules.is_deductible(&t.category))
        .collect();
    if !large.is_empty() {
        let total: f64 = large.iter().map(|t| t.amount).sum();
        let mut evidence = BTreeMap::new();
        evidence.insert("large_transaction_count".to_string(), json!(large.len()));
        evidence.insert("total_large_amount".to_string(), json!(total));

        tips.push(Tip {
            tip_id: String::new(),
            tip_type: TipType::Compliance,
            category: "Documentation".to_string(),
            title: "Ensure Proper Documentation for Large Expenses".to_string(),
            description: format!(
                "You have {} transactions over €{:.0} in deductible categories totaling \
                 €{total:.2}. Ensure you have proper receipts and documentation.",
                large.len(),
                tunables.large_transaction_threshold,
            ),
            action_items: vec![
                "Collect and organize receipts for all large deductible expenses".to_string(),
                "Consider digital receipt management tools".to_string(),
                "Maintain detailed records of the business purpose for each expense".to_string(),
            ],
            // Risk mitigation rather than savings.
            potential_savings: 0.0,
            confidence: tunables.documentation_confidence,
            priority: Priority::Low,
            evidence,
        });
    }

    // Quarterly planning for high earners.
    if let Some(filing) = ctx.filing {
        if filing.total_income > tunables.quarterly_income_threshold {
            let mut evidence = BTreeMap::new();
            evidence.insert("annual_income".to_string(), json!(filing.total_income));

            tips.push(Tip {
                tip_id: String::new(),
                tip_type: TipType::TaxPlanning,
                category: "Tax Planning".to_string(),
                title: "Consider Quarterly Tax Planning".to_string(),
                description: format!(
                    "With an income of €{:.2}, consider quarterly tax planning to avoid \
                     penalties and improve cash flow.",
                    filing.total_income,
                ),
                action_items: vec![
                    "Calculate estimated quarterly tax payments".to_string(),
                    "Set up automatic quarterly payments if beneficial".to_string(),
                    "Review tax strategy quarterly with a professional".to_string(),
                ],
                potential_savings: filing.total_income * tunables.quarterly_savings_factor,
                confidence: tunables.quarterly_confidence,
                priority: Priority::Low,
                evidence,
            });
        }
    }

    tips
}
