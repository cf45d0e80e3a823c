//! Document patterns: aggregates over OCR-extracted receipts and payslips.
//!
//! These records come from an external collaborator and may have any field
//! missing; absent lists degrade to empty aggregates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use taxlens_core::models::{PayslipRecord, ReceiptRecord};

use crate::stats::mean;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptAnalysis {
    pub total_receipts: usize,
    pub receipts_with_amounts: usize,
    pub average_receipt_amount: f64,
    pub total_receipt_value: f64,
    pub distinct_vendors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayslipAnalysis {
    pub total_payslips: usize,
    pub average_gross_pay: f64,
    pub average_net_pay: f64,
    /// mean(1 - net/gross) * 100 over payslips carrying both figures.
    pub average_deduction_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmploymentPatterns {
    pub positions: Vec<String>,
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatterns {
    pub receipt_analysis: ReceiptAnalysis,
    pub payslip_analysis: PayslipAnalysis,
    pub employment_patterns: EmploymentPatterns,
}

pub fn analyze(receipts: &[ReceiptRecord], payslips: &[PayslipRecord]) -> DocumentPatterns {
    let amounts: Vec<f64> = receipts.iter().filter_map(|r| r.total_amount).collect();
    let vendors: BTreeSet<&str> = receipts
        .iter()
        .filter_map(|r| r.vendor_name.as_deref())
        .collect();
    let receipt_analysis = ReceiptAnalysis {
        total_receipts: receipts.len(),
        receipts_with_amounts: amounts.len(),
        average_receipt_amount: mean(&amounts),
        total_receipt_value: amounts.iter().sum(),
        distinct_vendors: vendors.into_iter().map(String::from).collect(),
    };

    let gross: Vec<f64> = payslips.iter().filter_map(|p| p.gross_pay).collect();
    let net: Vec<f64> = payslips.iter().filter_map(|p| p.net_pay).collect();
    // Per-payslip implied deduction rate, skipping slips where either
    // figure is missing or gross is zero.
    let rates: Vec<f64> = payslips
        .iter()
        .filter_map(|p| match (p.gross_pay, p.net_pay) {
            (Some(g), Some(n)) if g > 0.0 => Some((1.0 - n / g) * 100.0),
            _ => None,
        })
        .collect();
    let payslip_analysis = PayslipAnalysis {
        total_payslips: payslips.len(),
        average_gross_pay: mean(&gross),
        average_net_pay: mean(&net),
        average_deduction_rate: mean(&rates),
    };

    let positions: BTreeSet<&str> = payslips
        .iter()
        .filter_map(|p| p.position.as_deref())
        .collect();
    let departments: BTreeSet<&str> = payslips
        .iter()
        .filter_map(|p| p.department.as_deref())
        .collect();
    let employment_patterns = EmploymentPatterns {
        positions: positions.into_iter().map(String::from).collect(),
        departments: departments.into_iter().map(String::from).collect(),
    };

    DocumentPatterns {
        receipt_analysis,
        payslip_analysis,
        employment_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_degrade_to_zero_aggregates() {
        let patterns = analyze(&[], &[]);
        assert_eq!(patterns.receipt_analysis.total_receipts, 0);
        assert_eq!(patterns.payslip_analysis.average_deduction_rate, 0.0);
        assert!(patterns.employment_patterns.positions.is_empty());
    }

    #[test]
    fn receipts_with_missing_amounts_still_counted() {
        let receipts = vec![
            ReceiptRecord {
                vendor_name: Some("Shop A".to_string()),
                total_amount: Some(120.0),
                ..Default::default()
            },
            ReceiptRecord {
                vendor_name: Some("Shop A".to_string()),
                ..Default::default()
            },
        ];
        let patterns = analyze(&receipts, &[]);
        assert_eq!(patterns.receipt_analysis.total_receipts, 2);
        assert_eq!(patterns.receipt_analysis.receipts_with_amounts, 1);
        assert_eq!(patterns.receipt_analysis.average_receipt_amount, 120.0);
        assert_eq!(patterns.receipt_analysis.distinct_vendors, vec!["Shop A"]);
    }

    #[test]
    fn payslip_deduction_rate_guards_zero_gross() {
        let payslips = vec![
            PayslipRecord {
                gross_pay: Some(4000.0),
                net_pay: Some(3000.0),
                position: Some("Analyst".to_string()),
                ..Default::default()
            },
            PayslipRecord {
                gross_pay: Some(0.0),
                net_pay: Some(0.0),
                ..Default::default()
            },
        ];
        let patterns = analyze(&[], &payslips);
        // Only the first slip contributes: (1 - 3000/4000) * 100 = 25.
        assert_eq!(patterns.payslip_analysis.average_deduction_rate, 25.0);
        assert_eq!(patterns.payslip_analysis.total_payslips, 2);
        assert_eq!(patterns.employment_patterns.positions, vec!["Analyst"]);
    }
}
