use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Receipt record supplied by the external OCR collaborator.
///
/// Every field may be missing; absent values degrade document patterns to
/// partial aggregates rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub vendor_name: Option<String>,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub receipt_date: Option<NaiveDate>,
    #[serde(default)]
    pub line_items: Vec<String>,
    pub supplier_address: Option<String>,
}

/// Payslip record supplied by the external OCR collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayslipRecord {
    pub employee_name: Option<String>,
    pub employer_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub gross_pay: Option<f64>,
    pub net_pay: Option<f64>,
    pub pay_period: Option<String>,
    #[serde(default)]
    pub deductions: Vec<String>,
}
