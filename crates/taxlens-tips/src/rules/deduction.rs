//! Deduction rule family: missed deductions in deductible categories.

use std::collections::BTreeMap;

use serde_json::json;
use taxlens_core::config::{DeductionRules, TaxBrackets};
use taxlens_core::models::{Priority, Tip, TipType};

use crate::context::UserContext;

/// Fixed confidence for deduction tips.
const DEDUCTION_CONFIDENCE: f64 = 0.8;

/// One tip per deductible category where the capped potential deduction
/// exceeds the user's recorded deductions.
pub fn emit(ctx: &UserContext<'_>, rules: &DeductionRules, brackets: &TaxBrackets) -> Vec<Tip> {
    let mut tips = Vec::new();

    for rule in rules.iter() {
        let in_category = ctx.category_transactions(&rule.category);
        if in_category.is_empty() {
            continue;
        }
        let spend: f64 = in_category.iter().map(|t| t.amount).sum();

        let uncapped = spend * rule.deduction_rate;
        let potential_deduction = match rule.max_annual {
            Some(cap) => uncapped.min(cap),
            None => uncapped,
        };
        let missed = (potential_deduction - ctx.recorded_deductions()).max(0.0);
        if missed <= 0.0 {
            continue;
        }

        let marginal_rate = brackets.marginal_rate(ctx.income());
        let potential_savings = missed * marginal_rate;

        let mut evidence = BTreeMap::new();
        evidence.insert("total_spending".to_string(), json!(spend));
        evidence.insert("transaction_count".to_string(), json!(in_category.len()));
        evidence.insert(
            "average_transaction".to_string(),
            json!(spend / in_category.len() as f64),
        );
        evidence.insert("potential_deduction".to_string(), json!(potential_deduction));
        evidence.insert("missed_deduction".to_string(), json!(missed));

        tips.push(Tip {
            tip_id: String::new(),
            tip_type: TipType::DeductionOpportunity,
            category: rule.category.clone(),
            title: format!("Maximize {} Deductions", rule.category),
            description: format!(
                "You spent €{spend:.2} on {}. You could potentially deduct €{potential_deduction:.2}, \
                 saving approximately €{potential_savings:.2} in taxes.",
                rule.description.to_lowercase(),
            ),
            action_items: vec![
                format!(
                    "Gather receipts for all {} expenses",
                    rule.category.to_lowercase()
                ),
                format!(
                    "Ensure expenses total at least €{:.0} to qualify",
                    rule.min_amount
                ),
                "Consult with a tax professional to confirm eligibility".to_string(),
            ],
            potential_savings,
            confidence: DEDUCTION_CONFIDENCE,
            priority: Priority::Low,
            evidence,
        });
    }

    tips
}
