//! Report configuration file handling
//!
//! Loads the optional ~/.config/datashare-report/config.yaml. Every field has a
//! default, so a missing default file is not an error; command-line values are
//! layered on top by the caller.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Azure Resource Manager endpoint
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// Microsoft.DataShare API version
pub const DEFAULT_API_VERSION: &str = "2019-11-01";

/// Environment variable consulted for a pre-acquired bearer token
pub const DEFAULT_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// The Data Share account the report is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_share_name: Option<String>,
}

/// Management API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Resource Manager endpoint, also used as the token audience
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding a bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            token_env: default_token_env(),
        }
    }
}

/// Report configuration
///
/// Represents the complete config.yaml file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

impl ReportConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the default path, falling back to defaults if it does not exist
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::new());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::ReportError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading report configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            endpoint = %config.api.endpoint,
            api_version = %config.api.api_version,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/datashare-report/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("datashare-report");
        path.push("config.yaml");
        path
    }

    /// Overlay non-empty values from another account section (e.g. CLI flags)
    pub fn merge_account(&mut self, overrides: AccountConfig) {
        if overrides.subscription_id.is_some() {
            self.account.subscription_id = overrides.subscription_id;
        }
        if overrides.resource_group_name.is_some() {
            self.account.resource_group_name = overrides.resource_group_name;
        }
        if overrides.data_share_name.is_some() {
            self.account.data_share_name = overrides.data_share_name;
        }
    }
}
