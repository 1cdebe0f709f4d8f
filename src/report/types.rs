//! Report output types
//!
//! Serialized as camelCase JSON. The 30-day field names are spelled out
//! explicitly because they are part of the report's public shape.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tenants whose last sync is older than this are stale
pub const STALE_AFTER_DAYS: i64 = 30;

/// Percentage reported when the account has no sent shares
pub const NO_SHARES_PERCENTAGE: f64 = -1.0;

/// `lastSync` of a tenant whose synchronizations carry no start time
pub const NEVER_SYNCED: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Account-wide counts and rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(rename = "syncedAtLeastOnceButNotSyncedFor30Days")]
    pub stale_tenants: usize,

    #[serde(rename = "syncedAtLeastOnceButNotSyncedFor30DaysPercentage")]
    pub stale_tenants_percentage: f64,

    pub sent_shares: usize,

    pub sent_share_with_sync_activity: usize,

    pub sent_share_with_sync_activity_percentage: f64,
}

/// Most recent synchronization of one consumer tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSync {
    pub name: String,
    pub last_sync: DateTime<Utc>,
}

/// The complete usage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub totals: Totals,

    /// Sorted by tenant name
    pub tenant_syncs: Vec<TenantSync>,

    /// Sorted by tenant name
    #[serde(rename = "tenantsSyncedAtLeastOnceButNotSyncedFor30Days")]
    pub stale_tenants: Vec<String>,
}

impl UsageReport {
    /// Indented camelCase JSON
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Syncs strictly before the returned instant are stale
pub fn stale_threshold(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(STALE_AFTER_DAYS)
}

/// Percentage of all sent shares covered by `numerator`, to two decimals.
///
/// Computed as `100 - ((total - numerator) / total * 100)` and rounded half to
/// even at two decimals. That value times 100 is exactly
/// `10000 * numerator / total`, so the rounding is done on the integer quotient
/// and remainder and matches decimal arithmetic at every midpoint. Returns
/// [`NO_SHARES_PERCENTAGE`] when there are no shares.
pub fn share_percentage(total_shares: usize, numerator: usize) -> f64 {
    if total_shares == 0 {
        return NO_SHARES_PERCENTAGE;
    }

    let hundredths = round_ratio_ties_even(10_000 * numerator as u128, total_shares as u128);
    hundredths as f64 / 100.0
}

/// `dividend / divisor` rounded to the nearest integer, ties to even
fn round_ratio_ties_even(dividend: u128, divisor: u128) -> u128 {
    let quotient = dividend / divisor;
    let twice_remainder = 2 * (dividend % divisor);

    if twice_remainder > divisor || (twice_remainder == divisor && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
