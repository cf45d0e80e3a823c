use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-cluster summary over its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub size: usize,
    pub avg_total_spending: f64,
    pub avg_deduction_rate: f64,
    /// Most frequent occupation among members, "Unknown" when none exists.
    pub dominant_occupation: String,
}

/// Result of a clustering run. Fully recomputed every analysis; read-only
/// downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClusteringOutcome {
    Clustered {
        /// user_id -> cluster id in [0, k).
        assignments: BTreeMap<String, usize>,
        summaries: Vec<ClusterSummary>,
    },
    Insufficient {
        clustering_note: String,
    },
}

impl ClusteringOutcome {
    /// Standard insufficiency marker (fewer than 3 usable feature rows).
    pub fn insufficient() -> Self {
        ClusteringOutcome::Insufficient {
            clustering_note: "insufficient data for clustering".to_string(),
        }
    }

    /// Cluster id for a user, if clustering ran and the user was assigned.
    pub fn assignment_of(&self, user_id: &str) -> Option<usize> {
        match self {
            ClusteringOutcome::Clustered { assignments, .. } => assignments.get(user_id).copied(),
            ClusteringOutcome::Insufficient { .. } => None,
        }
    }

    /// Summary for a cluster id, if clustering ran.
    pub fn summary_of(&self, cluster_id: usize) -> Option<&ClusterSummary> {
        match self {
            ClusteringOutcome::Clustered { summaries, .. } => {
                summaries.iter().find(|s| s.cluster_id == cluster_id)
            }
            ClusteringOutcome::Insufficient { .. } => None,
        }
    }
}
