//! Per-user report over a ranked tip list.

use std::collections::BTreeMap;

use taxlens_core::models::{Priority, PriorityBreakdown, Tip, TipReport};

/// Fixed summary when no tips were generated.
const NO_OPPORTUNITIES: &str = "No optimization opportunities identified at this time.";

/// Number of tips surfaced as top recommendations.
const TOP_RECOMMENDATIONS: usize = 3;

pub fn generate(user_id: &str, tips: &[Tip]) -> TipReport {
    if tips.is_empty() {
        return TipReport {
            user_id: user_id.to_string(),
            total_tips: 0,
            total_potential_savings: 0.0,
            priority_breakdown: PriorityBreakdown::default(),
            tips_by_type: BTreeMap::new(),
            top_recommendations: Vec::new(),
            summary: NO_OPPORTUNITIES.to_string(),
        };
    }

    let total_potential_savings: f64 = tips.iter().map(|t| t.potential_savings).sum();
    let count_of = |p: Priority| tips.iter().filter(|t| t.priority == p).count();
    let priority_breakdown = PriorityBreakdown {
        high: count_of(Priority::High),
        medium: count_of(Priority::Medium),
        low: count_of(Priority::Low),
    };

    let mut tips_by_type: BTreeMap<_, Vec<Tip>> = BTreeMap::new();
    for tip in tips {
        tips_by_type.entry(tip.tip_type).or_default().push(tip.clone());
    }

    let summary = format!(
        "Identified {} optimization opportunities with potential savings of €{:.2}. \
         Focus on {} high-priority items first.",
        tips.len(),
        total_potential_savings,
        priority_breakdown.high,
    );

    TipReport {
        user_id: user_id.to_string(),
        total_tips: tips.len(),
        total_potential_savings,
        priority_breakdown,
        tips_by_type,
        top_recommendations: tips.iter().take(TOP_RECOMMENDATIONS).cloned().collect(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxlens_core::models::TipType;

    fn tip(savings: f64, priority: Priority, tip_type: TipType) -> Tip {
        Tip {
            tip_id: String::new(),
            tip_type,
            category: "c".to_string(),
            title: String::new(),
            description: String::new(),
            action_items: vec![],
            potential_savings: savings,
            confidence: 0.8,
            priority,
            evidence: Default::default(),
        }
    }

    #[test]
    fn empty_list_yields_fixed_summary() {
        let report = generate("u1", &[]);
        assert_eq!(report.total_tips, 0);
        assert_eq!(report.total_potential_savings, 0.0);
        assert_eq!(report.summary, NO_OPPORTUNITIES);
        assert!(report.tips_by_type.is_empty());
    }

    #[test]
    fn totals_and_breakdown() {
        let tips = vec![
            tip(2000.0, Priority::High, TipType::DeductionOpportunity),
            tip(500.0, Priority::Medium, TipType::DeductionOpportunity),
            tip(10.0, Priority::Low, TipType::Compliance),
            tip(5.0, Priority::Low, TipType::TimingOptimization),
        ];
        let report = generate("u1", &tips);
        assert_eq!(report.total_tips, 4);
        assert_eq!(report.total_potential_savings, 2515.0);
        assert_eq!(report.priority_breakdown.high, 1);
        assert_eq!(report.priority_breakdown.medium, 1);
        assert_eq!(report.priority_breakdown.low, 2);
        assert_eq!(report.top_recommendations.len(), 3);
        assert_eq!(
            report.tips_by_type[&TipType::DeductionOpportunity].len(),
            2
        );
    }
}
