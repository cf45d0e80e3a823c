//! Seeded multi-start k-means (Lloyd iterations, k-means++ init).
//!
//! The fixed seed makes cluster assignments reproducible across runs on
//! identical input; the restarts guard against poor initializations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Best fit across all restarts.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster id in [0, k) per input row.
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    /// Total within-cluster squared Euclidean distance.
    pub inertia: f64,
}

/// Fit k-means on `data` with `restarts` seeded initializations, keeping
/// the fit with the lowest inertia.
///
/// Callers guarantee `1 <= k <= data.len()` and at least one row.
pub fn fit(data: &[Vec<f64>], k: usize, restarts: usize, max_iter: usize, seed: u64) -> KMeansFit {
    let mut best: Option<KMeansFit> = None;
    for restart in 0..restarts.max(1) {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(restart as u64));
        let candidate = fit_once(data, k, max_iter, &mut rng);
        let better = match &best {
            Some(current) => candidate.inertia < current.inertia,
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }
    best.expect("at least one restart runs")
}

fn fit_once(data: &[Vec<f64>], k: usize, max_iter: usize, rng: &mut StdRng) -> KMeansFit {
    let mut centroids = init_plus_plus(data, k, rng);
    let mut assignments = vec![0usize; data.len()];

    for _ in 0..max_iter {
        let next: Vec<usize> = data.iter().map(|p| nearest(p, &centroids)).collect();
        let converged = next == assignments;
        assignments = next;

        // Recompute centroids as member means.
        let dims = data[0].len();
        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in data.iter().zip(&assignments) {
            counts[cluster] += 1;
            for (j, v) in point.iter().enumerate() {
                sums[cluster][j] += v;
            }
        }
        for (cluster, sum) in sums.iter_mut().enumerate() {
            if counts[cluster] > 0 {
                for v in sum.iter_mut() {
                    *v /= counts[cluster] as f64;
                }
                centroids[cluster] = sum.clone();
            } else {
                // An emptied cluster is reseeded with the point currently
                // worst-served by its assigned centroid.
                let farthest = data
                    .iter()
                    .enumerate()
                    .max_by(|(i, a), (j, b)| {
                        let da = squared_distance(a.as_slice(), &centroids[assignments[*i]]);
                        let db = squared_distance(b.as_slice(), &centroids[assignments[*j]]);
                        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                centroids[cluster] = data[farthest].clone();
            }
        }

        if converged {
            break;
        }
    }

    // Final assignment against the converged centroids.
    let assignments: Vec<usize> = data.iter().map(|p| nearest(p, &centroids)).collect();
    let inertia = data
        .iter()
        .zip(&assignments)
        .map(|(p, &c)| squared_distance(p, &centroids[c]))
        .sum();

    KMeansFit {
        assignments,
        centroids,
        inertia,
    }
}

/// k-means++ seeding: first centroid uniform, the rest weighted by squared
/// distance to the nearest chosen centroid.
fn init_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(data[rng.gen_range(0..data.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = data
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| squared_distance(p, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        let index = if total > 0.0 {
            let mut target = rng.gen_range(0.0..total);
            let mut chosen = data.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            // All remaining points coincide with a centroid.
            rng.gen_range(0..data.len())
        };
        centroids.push(data[index].clone());
    }
    centroids
}

/// Index of the nearest centroid; ties go to the lowest index, which keeps
/// identical points in the same cluster.
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ]
    }

    #[test]
    fn separates_obvious_blobs() {
        let data = two_blobs();
        let result = fit(&data, 2, 10, 100, 42);
        assert_eq!(result.assignments[0], result.assignments[1]);
        assert_eq!(result.assignments[0], result.assignments[2]);
        assert_eq!(result.assignments[3], result.assignments[4]);
        assert_eq!(result.assignments[3], result.assignments[5]);
        assert_ne!(result.assignments[0], result.assignments[3]);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let data = two_blobs();
        let a = fit(&data, 2, 10, 100, 42);
        let b = fit(&data, 2, 10, 100, 42);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn identical_points_share_a_cluster() {
        let data = vec![
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![8.0, 9.0],
            vec![3.0, 3.0],
        ];
        let result = fit(&data, 3, 10, 100, 42);
        assert_eq!(result.assignments[0], result.assignments[1]);
    }

    #[test]
    fn k_equals_one_collapses_everything() {
        let data = two_blobs();
        let result = fit(&data, 1, 10, 100, 42);
        assert!(result.assignments.iter().all(|&c| c == 0));
    }
}
