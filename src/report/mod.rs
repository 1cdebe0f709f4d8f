//! Usage report
//!
//! Builds the account usage report from the share listing and each share's
//! synchronization history:
//!
//! - **builder**: insert-or-fail fold into one record per consumer tenant
//! - **types**: the serialized report shape and percentage rules
//! - **run**: sequential retrieval driving the fold

mod builder;
mod run;
mod types;

pub use builder::{ReportBuilder, TenantRecord};
pub use run::generate_report;
pub use types::{
    share_percentage, stale_threshold, TenantSync, Totals, UsageReport, NEVER_SYNCED,
    NO_SHARES_PERCENTAGE, STALE_AFTER_DAYS,
};
