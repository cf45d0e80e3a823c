use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{PRIORITY_HIGH_THRESHOLD, PRIORITY_MEDIUM_THRESHOLD};

/// Kind of recommendation a tip carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipType {
    DeductionOpportunity,
    TimingOptimization,
    CategoryOptimization,
    PeerLearning,
    Compliance,
    TaxPlanning,
}

/// Priority bucket, derived from impact = potential_savings * confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Pure threshold function over impact: >1000 HIGH, >300 MEDIUM, else LOW.
    pub fn from_impact(impact: f64) -> Self {
        if impact > PRIORITY_HIGH_THRESHOLD {
            Priority::High
        } else if impact > PRIORITY_MEDIUM_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// A single scored, ranked recommendation surfaced to one user.
///
/// Created per run, immutable afterward except for `tip_id` and `priority`
/// which are assigned during final ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    /// Deterministic id, `TIP_{user_id}_{rank:03}`, assigned after ranking.
    pub tip_id: String,
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub category: String,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub potential_savings: f64,
    /// In [0, 1].
    pub confidence: f64,
    pub priority: Priority,
    /// Free-form supporting numbers and labels.
    pub evidence: BTreeMap<String, serde_json::Value>,
}

impl Tip {
    /// Ranking key: estimated savings weighted by confidence.
    pub fn impact(&self) -> f64 {
        self.potential_savings * self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_thresholds() {
        assert_eq!(Priority::from_impact(1000.1), Priority::High);
        assert_eq!(Priority::from_impact(1000.0), Priority::Medium);
        assert_eq!(Priority::from_impact(300.1), Priority::Medium);
        assert_eq!(Priority::from_impact(300.0), Priority::Low);
        assert_eq!(Priority::from_impact(0.0), Priority::Low);
    }
}
