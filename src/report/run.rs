//! Report run orchestration
//!
//! Drains the share listing, then each share's synchronizations, one request at
//! a time, and folds them into a [`UsageReport`].

use super::builder::ReportBuilder;
use super::types::UsageReport;
use crate::datashare::ShareSource;
use crate::pagination::get_all_pages;
use crate::Result;
use chrono::{DateTime, Utc};
use tracing::info;

/// Generate the usage report for everything `source` exposes.
///
/// `now` is the single reference instant for every staleness comparison.
/// Any fetch failure or duplicate tenant aborts the run with no report.
pub async fn generate_report<S>(source: &S, now: DateTime<Utc>) -> Result<UsageReport>
where
    S: ShareSource + ?Sized,
{
    let shares = get_all_pages(|skip_token| source.list_shares(skip_token)).await?;
    info!(shares = shares.len(), "Retrieved sent shares");

    let mut builder = ReportBuilder::new();

    for share in &shares {
        let name = share.name.as_str();
        let syncs =
            get_all_pages(|skip_token| source.list_synchronizations(name, skip_token)).await?;
        builder.add_share(name, &syncs)?;
    }

    let report = builder.build(now);

    info!(
        sent_shares = report.totals.sent_shares,
        active = report.totals.sent_share_with_sync_activity,
        stale = report.totals.stale_tenants,
        "Usage report complete"
    );

    Ok(report)
}
