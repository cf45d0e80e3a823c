use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tip::{Tip, TipType};

/// Count of tips per priority bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Per-user summary over a ranked tip list. This is the artifact handed to
/// the report-rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipReport {
    pub user_id: String,
    pub total_tips: usize,
    pub total_potential_savings: f64,
    pub priority_breakdown: PriorityBreakdown,
    pub tips_by_type: BTreeMap<TipType, Vec<Tip>>,
    pub top_recommendations: Vec<Tip>,
    pub summary: String,
}
