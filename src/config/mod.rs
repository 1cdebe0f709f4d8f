//! Configuration system
//!
//! Loads ~/.config/datashare-report/config.yaml with support for:
//! - Default account coordinates (subscription, resource group, Data Share account)
//! - Management endpoint, API version and request timeout
//! - The environment variable holding a bearer token
//!
//! Command-line flags override file values.

mod report_config;
pub mod validation;

pub use report_config::{
    AccountConfig, ApiConfig, ReportConfig, DEFAULT_API_VERSION, DEFAULT_ENDPOINT,
    DEFAULT_TOKEN_ENV,
};
pub use validation::{
    validate_account, validate_api, validate_config, ShareAccount, ValidationError, ValidationResult,
};
