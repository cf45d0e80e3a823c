//! Final ranking: stable impact sort, truncation, id and priority
//! assignment.

use std::cmp::Ordering;

use taxlens_core::constants::MAX_TIPS_PER_USER;
use taxlens_core::models::{Priority, Tip};

/// Rank a concatenated tip list.
///
/// The sort is stable, so tips with equal impact keep their rule emission
/// order. Ids are 1-based over the truncated list.
pub fn rank(user_id: &str, mut tips: Vec<Tip>) -> Vec<Tip> {
    tips.sort_by(|a, b| {
        b.impact()
            .partial_cmp(&a.impact())
            .unwrap_or(Ordering::Equal)
    });
    tips.truncate(MAX_TIPS_PER_USER);
    for (i, tip) in tips.iter_mut().enumerate() {
        tip.tip_id = format!("TIP_{user_id}_{:03}", i + 1);
        tip.priority = Priority::from_impact(tip.impact());
    }
    tips
}
