//! Tenant aggregation
//!
//! Folds each share's synchronization history into one record per consumer
//! tenant, then derives the account totals.

use super::types::{
    share_percentage, stale_threshold, TenantSync, Totals, UsageReport, NEVER_SYNCED,
};
use crate::datashare::ShareSynchronization;
use crate::{ReportError, Result};
use chrono::{DateTime, Utc};
use std::collections::btree_map::{BTreeMap, Entry};

/// Aggregated state for one consumer tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantRecord {
    pub last_sync: DateTime<Utc>,
}

/// Accumulates shares into tenant records
///
/// A sent share targets exactly one tenant, so a tenant name may be recorded
/// only once per report. Tenants are kept in name order.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    tenants: BTreeMap<String, TenantRecord>,
    total_shares: usize,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one share and its complete synchronization history.
    ///
    /// Every share counts toward the share total. A share that never synced
    /// adds no tenant. Otherwise the first synchronization names the tenant
    /// and the latest start time becomes its `last_sync`.
    pub fn add_share(&mut self, share_name: &str, syncs: &[ShareSynchronization]) -> Result<()> {
        self.total_shares += 1;

        let Some(first) = syncs.first() else {
            tracing::debug!(share = %share_name, "Share has no synchronizations");
            return Ok(());
        };

        // An empty name is still a tenant; only an absent one is rejected.
        let tenant = first
            .consumer_tenant_name
            .as_deref()
            .ok_or_else(|| ReportError::MissingTenant {
                share: share_name.to_string(),
            })?;

        let last_sync = syncs
            .iter()
            .map(|sync| sync.start_time.unwrap_or(NEVER_SYNCED))
            .max()
            .unwrap_or(NEVER_SYNCED);

        tracing::debug!(
            share = %share_name,
            tenant = %tenant,
            syncs = syncs.len(),
            last_sync = %last_sync,
            "Share folded"
        );

        self.record_tenant(tenant, last_sync)
    }

    /// Insert a tenant record, failing if the name is already present
    pub fn record_tenant(&mut self, tenant: &str, last_sync: DateTime<Utc>) -> Result<()> {
        match self.tenants.entry(tenant.to_string()) {
            Entry::Occupied(_) => Err(ReportError::DuplicateTenant(tenant.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(TenantRecord { last_sync });
                Ok(())
            }
        }
    }

    pub fn share_count(&self) -> usize {
        self.total_shares
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }

    pub fn tenant(&self, name: &str) -> Option<&TenantRecord> {
        self.tenants.get(name)
    }

    /// Produce the report, judging staleness against a single `now`
    pub fn build(self, now: DateTime<Utc>) -> UsageReport {
        let threshold = stale_threshold(now);

        let stale_tenants: Vec<String> = self
            .tenants
            .iter()
            .filter(|(_, record)| record.last_sync < threshold)
            .map(|(name, _)| name.clone())
            .collect();

        let active = self.tenants.len();
        // The stale percentage is taken over active tenants that are not
        // stale, following the report definition rather than the stale count.
        let active_and_recent = active.saturating_sub(stale_tenants.len());

        let totals = Totals {
            stale_tenants: stale_tenants.len(),
            stale_tenants_percentage: share_percentage(self.total_shares, active_and_recent),
            sent_shares: self.total_shares,
            sent_share_with_sync_activity: active,
            sent_share_with_sync_activity_percentage: share_percentage(self.total_shares, active),
        };

        let tenant_syncs = self
            .tenants
            .into_iter()
            .map(|(name, record)| TenantSync {
                name,
                last_sync: record.last_sync,
            })
            .collect();

        UsageReport {
            totals,
            tenant_syncs,
            stale_tenants,
        }
    }
}
