mod cluster;
mod documents;
mod tax_filing;
mod tip;
mod tip_report;
mod transaction;
mod user;

pub use cluster::{ClusterSummary, ClusteringOutcome};
pub use documents::{PayslipRecord, ReceiptRecord};
pub use tax_filing::TaxFiling;
pub use tip::{Priority, Tip, TipType};
pub use tip_report::{PriorityBreakdown, TipReport};
pub use transaction::Transaction;
pub use user::User;
