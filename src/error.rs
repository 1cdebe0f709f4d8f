//! Error types for the Data Share usage report
//!
//! Every failure mode of a report run ends up in [`ReportError`]. Uses thiserror
//! for ergonomic error handling.

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Comprehensive error type for report operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential acquisition or rejected token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success response from the management API
    #[error("Data Share API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Malformed continuation link on a result page
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// Two shares resolved to the same consumer tenant name
    #[error(
        "Tenant '{0}' is the consumer of more than one share; \
         this report does not support multiple tenants with the same name"
    )]
    DuplicateTenant(String),

    /// A share's first synchronization carries no consumer tenant name
    #[error("Share '{share}' has synchronizations without a consumer tenant name")]
    MissingTenant { share: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ReportError {
    /// True for failures that happened while talking to the management API
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ReportError::Http(_) | ReportError::Api { .. } | ReportError::Auth(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tenant_names_tenant() {
        let err = ReportError::DuplicateTenant("Contoso".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'Contoso'"));
        assert!(msg.contains("multiple tenants with the same name"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ReportError::Api {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Data Share API error: HTTP 500: boom");
        assert!(err.is_transport());
    }

    #[test]
    fn test_non_transport_errors() {
        assert!(!ReportError::DuplicateTenant("x".into()).is_transport());
        assert!(!ReportError::Pagination("x".into()).is_transport());
        assert!(ReportError::Auth("x".into()).is_transport());
    }
}
