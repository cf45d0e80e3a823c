//! ClusteringEngine — feature build, standardization, k-means, summaries.

use std::collections::BTreeMap;

use tracing::{debug, info};

use taxlens_core::constants::{
    KMEANS_MAX_ITERATIONS, KMEANS_RESTARTS, KMEANS_SEED, MAX_CLUSTERS, MIN_USERS_FOR_CLUSTERING,
};
use taxlens_core::models::{ClusterSummary, ClusteringOutcome, TaxFiling, Transaction, User};

use crate::features::{build_feature_matrix, standardize};
use crate::kmeans;

/// Segments users into behavioral cohorts. Stateless; every run recomputes
/// assignments and summaries in full.
pub struct ClusteringEngine;

impl ClusteringEngine {
    /// Cluster all users with transactions.
    ///
    /// Skips entirely (returning the insufficiency note) when fewer than 3
    /// usable feature rows exist.
    pub fn cluster(
        transactions: &[Transaction],
        users: &[User],
        filings: &[TaxFiling],
    ) -> ClusteringOutcome {
        let Some(matrix) = build_feature_matrix(transactions, filings) else {
            debug!("fewer than 2 users with transactions, skipping clustering");
            return ClusteringOutcome::insufficient();
        };
        if matrix.len() < MIN_USERS_FOR_CLUSTERING {
            debug!(rows = matrix.len(), "too few feature rows, skipping clustering");
            return ClusteringOutcome::insufficient();
        }

        let k = MAX_CLUSTERS.min(matrix.len() - 1);
        let standardized = standardize(&matrix);
        let fit = kmeans::fit(
            &standardized,
            k,
            KMEANS_RESTARTS,
            KMEANS_MAX_ITERATIONS,
            KMEANS_SEED,
        );
        info!(users = matrix.len(), k, inertia = fit.inertia, "clustering complete");

        let total_spending = matrix
            .column("total_spending")
            .unwrap_or_else(|| vec![0.0; matrix.len()]);
        let deduction_rate = matrix
            .column("deduction_rate")
            .unwrap_or_else(|| vec![0.0; matrix.len()]);

        let summaries = (0..k)
            .map(|cluster_id| {
                let members: Vec<usize> = fit
                    .assignments
                    .iter()
                    .enumerate()
                    .filter(|(_, &c)| c == cluster_id)
                    .map(|(i, _)| i)
                    .collect();
                let size = members.len();
                let mean = |values: &[f64]| {
                    if size == 0 {
                        0.0
                    } else {
                        members.iter().map(|&i| values[i]).sum::<f64>() / size as f64
                    }
                };
                ClusterSummary {
                    cluster_id,
                    size,
                    avg_total_spending: mean(&total_spending),
                    avg_deduction_rate: mean(&deduction_rate),
                    dominant_occupation: dominant_occupation(&members, &matrix.user_ids, users),
                }
            })
            .collect();

        let assignments: BTreeMap<String, usize> = matrix
            .user_ids
            .iter()
            .cloned()
            .zip(fit.assignments.iter().copied())
            .collect();

        ClusteringOutcome::Clustered {
            assignments,
            summaries,
        }
    }
}

/// Most frequent occupation among cluster members; ties resolve to the
/// occupation first encountered in user order, "Unknown" when no member
/// has a demographic row.
fn dominant_occupation(members: &[usize], user_ids: &[String], users: &[User]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &row in members {
        let Some(user) = users.iter().find(|u| u.user_id == user_ids[row]) else {
            continue;
        };
        match counts
            .iter_mut()
            .find(|(occ, _)| *occ == user.occupation_category)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((user.occupation_category.as_str(), 1)),
        }
    }
    // Strictly-greater comparison keeps the earliest occupation on ties.
    let mut best: Option<(&str, usize)> = None;
    for &(occ, n) in &counts {
        if best.map_or(true, |(_, bn)| n > bn) {
            best = Some((occ, n));
        }
    }
    best.map(|(occ, _)| occ.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
