//! Timing rule family: year-end donation lump sums and irregular medical
//! spend.

use std::collections::BTreeMap;

use serde_json::json;
use taxlens_core::config::TipTunables;
use taxlens_core::models::{Priority, Tip, TipType};

use crate::context::UserContext;

pub fn emit(ctx: &UserContext<'_>, tunables: &TipTunables) -> Vec<Tip> {
    let mut tips = Vec::new();

    // December charitable-giving concentration.
    let december: Vec<f64> = ctx
        .transactions
        .iter()
        .filter(|t| t.month() == 12 && t.category == "Charitable Donations")
        .map(|t| t.amount)
        .collect();
    let december_total: f64 = december.iter().sum();
    if december_total > 0.0 {
        let average = december_total / december.len() as f64;
        let mut evidence = BTreeMap::new();
        evidence.insert("december_donations".to_string(), json!(december_total));
        evidence.insert("donation_count".to_string(), json!(december.len()));

        tips.push(Tip {
            tip_id: String::new(),
            tip_type: TipType::TimingOptimization,
            category: "Charitable Donations".to_string(),
            title: "Optimize Year-End Charitable Giving".to_string(),
            description: format!(
                "You donated €{december_total:.2} in December. Consider spreading donations \
                 throughout the year for better cash flow management while keeping the same \
                 tax benefits."
            ),
            action_items: vec![
                "Set up monthly charitable giving instead of a lump sum".to_string(),
                "Consider automatic deductions to spread giving evenly".to_string(),
                "Track donations throughout the year for tax planning".to_string(),
            ],
            potential_savings: average * tunables.december_savings_factor,
            confidence: tunables.december_confidence,
            priority: Priority::Low,
            evidence,
        });
    }

    // Irregular medical spend across months.
    let medical = ctx.category_transactions("Medical");
    if !medical.is_empty() {
        let mut monthly: BTreeMap<u32, f64> = BTreeMap::new();
        for tx in &medical {
            *monthly.entry(tx.month()).or_default() += tx.amount;
        }
        let sums: Vec<f64> = monthly.values().copied().collect();
        let deviation = monthly_std(&sums);
        if deviation > 0.0 {
            let total: f64 = medical.iter().map(|t| t.amount).sum();
            let mut evidence = BTreeMap::new();
            evidence.insert("monthly_variance".to_string(), json!(deviation));
            evidence.insert("total_medical".to_string(), json!(total));

            tips.push(Tip {
                tip_id: String::new(),
                tip_type: TipType::TimingOptimization,
                category: "Medical".to_string(),
                title: "Time Medical Expenses Strategically".to_string(),
                description: format!(
                    "Your medical expenses vary significantly by month (std: €{deviation:.2}). \
                     Consider timing elective procedures to maximize tax benefits."
                ),
                action_items: vec![
                    "Schedule elective procedures in high-income years".to_string(),
                    "Bundle medical expenses into a single tax year where possible".to_string(),
                    "Track all medical expenses throughout the year".to_string(),
                ],
                potential_savings: deviation * tunables.medical_variance_savings_factor,
                confidence: tunables.medical_timing_confidence,
                priority: Priority::Low,
                evidence,
            });
        }
    }

    tips
}

/// Sample std over the observed monthly sums; 0 below two months of data.
fn monthly_std(sums: &[f64]) -> f64 {
    if sums.len() < 2 {
        return 0.0;
    }
    let mean = sums.iter().sum::<f64>() / sums.len() as f64;
    let variance = sums.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (sums.len() - 1) as f64;
    variance.sqrt()
}
