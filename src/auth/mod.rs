//! Credential acquisition for the Azure management endpoint
//!
//! The report only needs a bearer token whose audience is the Resource Manager
//! endpoint. Sources are tried in order:
//!
//! 1. A token passed explicitly (e.g. `--access-token`)
//! 2. The configured environment variable (default `AZURE_ACCESS_TOKEN`)
//! 3. `az account get-access-token` from a logged-in Azure CLI

use crate::{ReportError, Result};
use anyhow::Context;
use std::process::Command;

const AZURE_CLI: &str = "az";

/// Where a token came from, for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Explicit,
    Environment(String),
    AzureCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Explicit => write!(f, "command line"),
            TokenSource::Environment(var) => write!(f, "${}", var),
            TokenSource::AzureCli => write!(f, "Azure CLI"),
        }
    }
}

/// A bearer token for the management API
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub source: TokenSource,
}

// Never print the token itself.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Resolve a token for `resource` using the process environment
pub fn resolve_token(explicit: Option<&str>, token_env: &str, resource: &str) -> Result<AccessToken> {
    resolve_token_with(explicit, token_env, resource, |var| std::env::var(var).ok())
}

/// Resolve a token with an injectable environment lookup
pub fn resolve_token_with<F>(
    explicit: Option<&str>,
    token_env: &str,
    resource: &str,
    lookup: F,
) -> Result<AccessToken>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(AccessToken {
            token: token.to_string(),
            source: TokenSource::Explicit,
        });
    }

    let env_var = token_env.trim_start_matches('$');
    if !env_var.is_empty() {
        if let Some(token) = lookup(env_var).map(|t| t.trim().to_string()) {
            if !token.is_empty() {
                tracing::debug!(env_var, "Using token from environment");
                return Ok(AccessToken {
                    token,
                    source: TokenSource::Environment(env_var.to_string()),
                });
            }
        }
    }

    let token = azure_cli_token(resource)?;
    tracing::debug!("Using token from `az account get-access-token`");
    Ok(AccessToken {
        token,
        source: TokenSource::AzureCli,
    })
}

/// Ask a logged-in Azure CLI for a token
fn azure_cli_token(resource: &str) -> Result<String> {
    let output = Command::new(AZURE_CLI)
        .args([
            "account",
            "get-access-token",
            "--resource",
            resource,
            "--query",
            "accessToken",
            "--output",
            "tsv",
        ])
        .output()
        .map_err(|e| {
            ReportError::Auth(format!(
                "No access token found and Azure CLI (az) could not be run. \
                 Set AZURE_ACCESS_TOKEN or run `az login`.\nError: {}",
                e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReportError::Auth(format!(
            "Azure CLI could not issue a token for {}. Run: az login\n{}",
            resource,
            stderr.trim()
        )));
    }

    let token = String::from_utf8(output.stdout)
        .context("Azure CLI returned a token that is not valid UTF-8")?
        .trim()
        .to_string();

    if token.is_empty() {
        return Err(ReportError::Auth(
            "Azure CLI returned an empty access token".to_string(),
        ));
    }

    Ok(token)
}
