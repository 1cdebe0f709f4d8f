//! DataShare Report - point-in-time usage report for an Azure Data Share account
//!
//! Enumerates every sent share of an account, finds each consumer tenant's
//! most recent synchronization, and summarizes how many tenants are active
//! and how many have gone quiet for 30 days or more.
//!
//! # Architecture
//!
//! - **pagination**: Generic `$skipToken` drain for list operations
//! - **report**: Tenant aggregation, totals and the JSON report shape
//! - **datashare**: Wire models and HTTP client for Microsoft.DataShare
//! - **auth**: Bearer token acquisition
//! - **config**: YAML configuration and validation

pub mod auth;
pub mod config;
pub mod datashare;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod report;

// Re-exports
pub use error::{ReportError, Result};
