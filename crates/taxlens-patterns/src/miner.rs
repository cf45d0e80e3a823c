//! PatternMiner — computes all seven families for one analysis run.

use serde::{Deserialize, Serialize};
use tracing::info;

use taxlens_clustering::ClusteringEngine;
use taxlens_core::config::DeductionRules;
use taxlens_core::models::{ClusteringOutcome, PayslipRecord, ReceiptRecord, TaxFiling, Transaction, User};

use crate::families::{
    deduction, demographic, document, seasonal, tax_optimization, transaction,
    DeductionOpportunities, DemographicPatterns, DocumentPatterns, SeasonalPatterns,
    TaxOptimizationPatterns, TransactionPatterns,
};

/// Output of one full analysis run. Produced once, read-only afterward;
/// the field names are the seven family keys of the JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternBundle {
    pub transaction_patterns: TransactionPatterns,
    pub demographic_patterns: DemographicPatterns,
    pub tax_optimization_patterns: TaxOptimizationPatterns,
    pub seasonal_patterns: SeasonalPatterns,
    pub document_patterns: DocumentPatterns,
    pub clustering_patterns: ClusteringOutcome,
    pub deduction_opportunities: DeductionOpportunities,
}

/// Stateless miner over fully materialized, immutable input tables.
pub struct PatternMiner;

impl PatternMiner {
    /// Run every family. Each family degrades independently on missing
    /// input; nothing here fails.
    pub fn mine(
        transactions: &[Transaction],
        users: &[User],
        filings: &[TaxFiling],
        receipts: &[ReceiptRecord],
        payslips: &[PayslipRecord],
        rules: &DeductionRules,
    ) -> PatternBundle {
        info!(
            transactions = transactions.len(),
            users = users.len(),
            filings = filings.len(),
            receipts = receipts.len(),
            payslips = payslips.len(),
            "starting pattern analysis"
        );

        let clustering_patterns = ClusteringEngine::cluster(transactions, users, filings);

        let bundle = PatternBundle {
            transaction_patterns: transaction::analyze(transactions),
            demographic_patterns: demographic::analyze(transactions, users, filings),
            tax_optimization_patterns: tax_optimization::analyze(transactions, filings, rules),
            seasonal_patterns: seasonal::analyze(transactions),
            document_patterns: document::analyze(receipts, payslips),
            clustering_patterns,
            deduction_opportunities: deduction::analyze(transactions, rules),
        };

        info!("pattern analysis complete");
        bundle
    }
}
