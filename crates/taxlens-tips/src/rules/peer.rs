//! Peer-learning rule family: one tip when the user's cluster shows a
//! strong average deduction rate.

use std::collections::BTreeMap;

use serde_json::json;
use taxlens_core::config::TipTunables;
use taxlens_core::models::{Priority, Tip, TipType};
use taxlens_patterns::PatternBundle;

use crate::context::UserContext;

/// Savings proxy per percentage point of cluster deduction rate.
const SAVINGS_PER_RATE_POINT: f64 = 10.0;

/// Emits exactly one generic tip when the user's cluster averages a
/// deduction rate above the threshold. Skipped entirely when clustering
/// was unavailable or the user has no assignment.
pub fn emit(ctx: &UserContext<'_>, patterns: &PatternBundle, tunables: &TipTunables) -> Vec<Tip> {
    let Some(cluster_id) = patterns.clustering_patterns.assignment_of(ctx.user_id) else {
        return Vec::new();
    };
    let Some(summary) = patterns.clustering_patterns.summary_of(cluster_id) else {
        return Vec::new();
    };
    if summary.avg_deduction_rate <= tunables.peer_deduction_rate_threshold {
        return Vec::new();
    }

    let mut evidence = BTreeMap::new();
    evidence.insert("cluster_id".to_string(), json!(cluster_id));
    evidence.insert("cluster_size".to_string(), json!(summary.size));
    evidence.insert(
        "avg_deduction_rate".to_string(),
        json!(summary.avg_deduction_rate),
    );

    vec![Tip {
        tip_id: String::new(),
        tip_type: TipType::PeerLearning,
        category: "General".to_string(),
        title: "Learn from Similar Taxpayers".to_string(),
        description: format!(
            "Users with similar profiles ({} taxpayers in your segment) achieve an average \
             deduction rate of {:.1}%. Consider reviewing your deduction strategy.",
            summary.size, summary.avg_deduction_rate,
        ),
        action_items: vec![
            "Review all possible deduction categories".to_string(),
            "Consider consulting with a tax professional".to_string(),
            "Implement better expense tracking systems".to_string(),
        ],
        potential_savings: summary.avg_deduction_rate * SAVINGS_PER_RATE_POINT,
        confidence: tunables.peer_learning_confidence,
        priority: Priority::Low,
        evidence,
    }]
}
