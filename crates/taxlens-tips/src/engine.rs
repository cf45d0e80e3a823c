//! TipEngine — coordinates the rule families, ranking, and reports.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use taxlens_core::config::{DeductionRules, TaxBrackets, TipTunables};
use taxlens_core::models::{TaxFiling, Tip, TipReport, Transaction, User};
use taxlens_core::TaxlensResult;
use taxlens_patterns::PatternBundle;

use crate::context::UserContext;
use crate::{ranking, report, rules};

/// Tip generator over validated static tables. Construct once, share by
/// reference; per-user generation holds no mutable state.
pub struct TipEngine {
    rules: DeductionRules,
    brackets: TaxBrackets,
    tunables: TipTunables,
}

impl TipEngine {
    pub fn new(rules: DeductionRules, brackets: TaxBrackets, tunables: TipTunables) -> Self {
        Self {
            rules,
            brackets,
            tunables,
        }
    }

    /// Engine over the standard rule and bracket tables. Table validation
    /// happens here, before any analysis run.
    pub fn standard() -> TaxlensResult<Self> {
        Ok(Self::new(
            DeductionRules::standard()?,
            TaxBrackets::standard()?,
            TipTunables::default(),
        ))
    }

    pub fn rules(&self) -> &DeductionRules {
        &self.rules
    }

    pub fn brackets(&self) -> &TaxBrackets {
        &self.brackets
    }

    /// Generate the ranked tip list (at most 10) for one user.
    ///
    /// A user with no transactions yields an empty list; any other missing
    /// join degrades only the rule families that need it.
    pub fn generate_for_user(
        &self,
        user_id: &str,
        transactions: &[Transaction],
        users: &[User],
        filings: &[TaxFiling],
        patterns: &PatternBundle,
    ) -> Vec<Tip> {
        let ctx = UserContext::new(user_id, transactions, users, filings);
        if ctx.transactions.is_empty() {
            debug!(user_id, "no transactions, empty tip list");
            return Vec::new();
        }

        let tips = rules::emit_all(&ctx, patterns, &self.rules, &self.brackets, &self.tunables);
        debug!(user_id, emitted = tips.len(), "rule families evaluated");
        ranking::rank(user_id, tips)
    }

    /// Generate tips for every user in the demographic table, in parallel.
    /// Per-user evaluation shares only the read-only pattern bundle and
    /// static tables, so no locking is needed.
    pub fn generate_for_all(
        &self,
        transactions: &[Transaction],
        users: &[User],
        filings: &[TaxFiling],
        patterns: &PatternBundle,
    ) -> BTreeMap<String, Vec<Tip>> {
        users
            .par_iter()
            .map(|user| {
                let tips = self.generate_for_user(
                    &user.user_id,
                    transactions,
                    users,
                    filings,
                    patterns,
                );
                (user.user_id.clone(), tips)
            })
            .collect()
    }

    /// Summarize a ranked tip list for one user.
    pub fn generate_report(&self, user_id: &str, tips: &[Tip]) -> TipReport {
        report::generate(user_id, tips)
    }
}
