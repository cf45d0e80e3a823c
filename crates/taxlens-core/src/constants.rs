/// Taxlens engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of tips returned per user.
pub const MAX_TIPS_PER_USER: usize = 10;

/// Upper bound on k for user clustering.
pub const MAX_CLUSTERS: usize = 5;

/// Minimum usable feature rows before clustering runs at all.
pub const MIN_USERS_FOR_CLUSTERING: usize = 3;

/// Minimum users with transactions before a feature matrix is built.
pub const MIN_USERS_FOR_FEATURES: usize = 2;

/// Fixed seed for k-means restarts (determinism across runs).
pub const KMEANS_SEED: u64 = 42;

/// Number of randomized k-means restarts.
pub const KMEANS_RESTARTS: usize = 10;

/// Iteration cap per k-means restart.
pub const KMEANS_MAX_ITERATIONS: usize = 100;

/// Vendors surfaced per category in transaction patterns.
pub const TOP_VENDORS_PER_CATEGORY: usize = 5;

/// Minimum (user, vendor, category) frequency to count as a repeat pattern.
pub const REPEAT_TRANSACTION_MIN_COUNT: usize = 2;

/// Priority thresholds on impact = potential_savings * confidence.
pub const PRIORITY_HIGH_THRESHOLD: f64 = 1000.0;
pub const PRIORITY_MEDIUM_THRESHOLD: f64 = 300.0;

/// Income assumed when a user has no tax filing on record.
pub const DEFAULT_INCOME: f64 = 50000.0;
