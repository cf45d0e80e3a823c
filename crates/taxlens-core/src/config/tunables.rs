use serde::{Deserialize, Serialize};

/// Empirically chosen scoring constants for the tip rule families.
///
/// These have no stated derivation; they are kept configurable instead of
/// being folded into the rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TipTunables {
    /// Confidence of the December charitable-giving timing tip.
    pub december_confidence: f64,
    /// Confidence of the medical-expense timing tip.
    pub medical_timing_confidence: f64,
    /// Confidence of category-optimization tips.
    pub category_confidence: f64,
    /// Confidence of the peer-learning tip.
    pub peer_learning_confidence: f64,
    /// Confidence of the documentation compliance tip.
    pub documentation_confidence: f64,
    /// Confidence of the quarterly-planning compliance tip.
    pub quarterly_confidence: f64,
    /// User spend below this fraction of the peer average triggers a
    /// category-optimization tip.
    pub peer_spend_threshold: f64,
    /// Cluster average deduction rate (percent) above which the
    /// peer-learning tip fires.
    pub peer_deduction_rate_threshold: f64,
    /// Single-transaction amount above which documentation is flagged.
    pub large_transaction_threshold: f64,
    /// Income above which quarterly tax planning is suggested.
    pub quarterly_income_threshold: f64,
    /// Cash-flow savings proxy per unit of average December donation.
    pub december_savings_factor: f64,
    /// Savings proxy per unit of monthly medical-spend deviation.
    pub medical_variance_savings_factor: f64,
    /// Penalty-avoidance proxy per unit of income.
    pub quarterly_savings_factor: f64,
}

impl Default for TipTunables {
    fn default() -> Self {
        Self {
            december_confidence: 0.7,
            medical_timing_confidence: 0.75,
            category_confidence: 0.5,
            peer_learning_confidence: 0.4,
            documentation_confidence: 0.9,
            quarterly_confidence: 0.7,
            peer_spend_threshold: 0.8,
            peer_deduction_rate_threshold: 15.0,
            large_transaction_threshold: 500.0,
            quarterly_income_threshold: 60000.0,
            december_savings_factor: 0.1,
            medical_variance_savings_factor: 0.2,
            quarterly_savings_factor: 0.01,
        }
    }
}
