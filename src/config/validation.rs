//! Configuration validation
//!
//! Checks the merged configuration before any network call:
//! - The three account identifiers are present and not blank
//! - The endpoint is an absolute http(s) URL
//! - The request timeout is non-zero

use super::report_config::{AccountConfig, ApiConfig, ReportConfig};
use reqwest::Url;

/// Account identifier fields, in the order they are checked
const ACCOUNT_FIELDS: [&str; 3] = ["subscriptionId", "resourceGroupName", "dataShareName"];

/// Validation error details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "must be provided.")
    }

    /// True when this error is about one of the three account identifiers
    pub fn is_account_field(&self) -> bool {
        ACCOUNT_FIELDS.contains(&self.field.as_str())
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult<T = ()> = std::result::Result<T, Vec<ValidationError>>;

/// Fully specified account coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareAccount {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub data_share_name: String,
}

/// Validate the whole configuration and resolve the account
pub fn validate_config(config: &ReportConfig) -> ValidationResult<ShareAccount> {
    let account = validate_account(&config.account);
    let api = validate_api(&config.api);

    match (account, api) {
        (Ok(account), Ok(())) => Ok(account),
        (Ok(_), Err(errors)) => Err(errors),
        (Err(errors), Ok(())) => Err(errors),
        (Err(mut errors), Err(mut more)) => {
            errors.append(&mut more);
            Err(errors)
        }
    }
}

/// Require the three identifiers, in the order they are documented on the CLI
pub fn validate_account(account: &AccountConfig) -> ValidationResult<ShareAccount> {
    let mut errors = Vec::new();

    let subscription_id = required(&account.subscription_id, ACCOUNT_FIELDS[0], &mut errors);
    let resource_group_name =
        required(&account.resource_group_name, ACCOUNT_FIELDS[1], &mut errors);
    let data_share_name = required(&account.data_share_name, ACCOUNT_FIELDS[2], &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ShareAccount {
        subscription_id,
        resource_group_name,
        data_share_name,
    })
}

/// Check endpoint, API version and timeout
pub fn validate_api(api: &ApiConfig) -> ValidationResult {
    let mut errors = Vec::new();

    match Url::parse(&api.endpoint) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.endpoint",
            format!("has unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "api.endpoint",
            format!("is not a valid URL: {}", e),
        )),
    }

    if api.api_version.trim().is_empty() {
        errors.push(ValidationError::missing("api.api_version"));
    }

    if api.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "api.timeout_secs",
            "must be greater than 0.",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn required(value: &Option<String>, field: &str, errors: &mut Vec<ValidationError>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(ValidationError::missing(field));
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_account() -> AccountConfig {
        AccountConfig {
            subscription_id: Some("00000000-0000-0000-0000-000000000000".to_string()),
            resource_group_name: Some("rg".to_string()),
            data_share_name: Some("account".to_string()),
        }
    }

    #[test]
    fn test_valid_account() {
        let account = validate_account(&full_account()).unwrap();
        assert_eq!(account.resource_group_name, "rg");
        assert_eq!(account.data_share_name, "account");
    }

    #[test]
    fn test_blank_values_are_missing() {
        let mut account = full_account();
        account.resource_group_name = Some("   ".to_string());
        account.data_share_name = None;

        let errors = validate_account(&account).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "resourceGroupName must be provided.");
        assert_eq!(errors[1].to_string(), "dataShareName must be provided.");
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut account = full_account();
        account.data_share_name = Some("  padded ".to_string());
        assert_eq!(validate_account(&account).unwrap().data_share_name, "padded");
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = ReportConfig::new();
        config.account = full_account();
        config.api.endpoint = "not a url".to_string();
        config.api.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "api.endpoint"));
        assert!(errors.iter().any(|e| e.field == "api.timeout_secs"));
    }

    #[test]
    fn test_errors_are_combined() {
        let mut config = ReportConfig::new();
        config.api.endpoint = "ftp://example.com".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, "subscriptionId");
        assert_eq!(errors[3].field, "api.endpoint");
        assert!(errors[..3].iter().all(ValidationError::is_account_field));
        assert!(!errors[3].is_account_field());
    }
}
