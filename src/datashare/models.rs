//! Microsoft.DataShare wire types
//!
//! Only the fields the report reads are required; everything else is optional
//! so schema drift in the service does not break deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sent share (ProxyDto shape: `id`, `name`, `type`, `properties`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub properties: Option<ShareProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareProperties {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub share_kind: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Share {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            resource_type: None,
            properties: None,
        }
    }
}

/// One synchronization run of a sent share, as seen by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSynchronization {
    #[serde(default)]
    pub consumer_tenant_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consumer_name: Option<String>,
    #[serde(default)]
    pub consumer_email: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub synchronization_id: Option<String>,
    #[serde(default)]
    pub synchronization_mode: Option<String>,
}

impl ShareSynchronization {
    pub fn new(consumer_tenant_name: impl Into<String>, start_time: Option<DateTime<Utc>>) -> Self {
        Self {
            consumer_tenant_name: Some(consumer_tenant_name.into()),
            start_time,
            end_time: None,
            consumer_name: None,
            consumer_email: None,
            duration_ms: None,
            message: None,
            status: None,
            synchronization_id: None,
            synchronization_mode: None,
        }
    }
}
