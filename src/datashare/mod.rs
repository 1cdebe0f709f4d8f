//! Azure Data Share integration
//!
//! Wire models and the HTTP client for the provider-side list operations the
//! report consumes. [`ShareSource`] is the seam between the report and the
//! transport: the HTTP client implements it, and tests substitute in-memory
//! sources.

pub mod client;
pub mod models;

use crate::pagination::Page;
use crate::Result;
use async_trait::async_trait;

pub use client::DataShareClient;
pub use models::{Share, ShareProperties, ShareSynchronization};

/// Page-at-a-time access to an account's shares and their synchronizations
#[async_trait]
pub trait ShareSource: Send + Sync {
    /// One page of sent shares
    async fn list_shares(&self, skip_token: Option<String>) -> Result<Page<Share>>;

    /// One page of synchronizations for a sent share
    async fn list_synchronizations(
        &self,
        share_name: &str,
        skip_token: Option<String>,
    ) -> Result<Page<ShareSynchronization>>;
}
