//! The five tip rule families, invoked in a fixed emission order.
//!
//! Order matters: ranking uses a stable sort, so equal-impact tips keep
//! this order (deduction, timing, category, peer learning, compliance).

pub mod category;
pub mod compliance;
pub mod deduction;
pub mod peer;
pub mod timing;

use taxlens_core::config::{DeductionRules, TaxBrackets, TipTunables};
use taxlens_core::models::Tip;
use taxlens_patterns::PatternBundle;

use crate::context::UserContext;

/// Run every rule family and concatenate the emitted tips in order.
pub fn emit_all(
    ctx: &UserContext<'_>,
    patterns: &PatternBundle,
    rules: &DeductionRules,
    brackets: &TaxBrackets,
    tunables: &TipTunables,
) -> Vec<Tip> {
    let mut tips = Vec::new();
    tips.extend(deduction::emit(ctx, rules, brackets));
    tips.extend(timing::emit(ctx, tunables));
    tips.extend(category::emit(ctx, patterns, rules, brackets, tunables));
    tips.extend(peer::emit(ctx, patterns, tunables));
    tips.extend(compliance::emit(ctx, rules, tunables));
    tips
}
