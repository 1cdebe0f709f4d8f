//! DataShare Report
//!
//! Main entry point for the datashare-report CLI.

use chrono::Utc;
use clap::Parser;
use datashare_report::auth;
use datashare_report::config::{validate_config, AccountConfig, ReportConfig, ValidationError};
use datashare_report::datashare::DataShareClient;
use datashare_report::report::generate_report;
use datashare_report::ReportError;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Usage report for the sent shares of an Azure Data Share account
#[derive(Parser, Debug)]
#[command(name = "datashare-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Azure subscription ID
    #[arg(long, env = "DATASHARE_SUBSCRIPTION_ID")]
    subscription_id: Option<String>,

    /// Resource group containing the Data Share account
    #[arg(long, env = "DATASHARE_RESOURCE_GROUP_NAME")]
    resource_group_name: Option<String>,

    /// Data Share account name
    #[arg(long, env = "DATASHARE_NAME")]
    data_share_name: Option<String>,

    /// Path to config file (default: ~/.config/datashare-report/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resource Manager endpoint (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Microsoft.DataShare API version (overrides config)
    #[arg(long)]
    api_version: Option<String>,

    /// Bearer token for the management API (skips environment and Azure CLI lookup)
    #[arg(long, hide = true)]
    access_token: Option<String>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = datashare_report::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if e.is_transport() {
            eprintln!(
                "Check the account identifiers and that the access token is valid for the management endpoint."
            );
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> datashare_report::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => ReportConfig::load(path)?,
        None => ReportConfig::load_default()?,
    };

    config.merge_account(AccountConfig {
        subscription_id: cli.subscription_id,
        resource_group_name: cli.resource_group_name,
        data_share_name: cli.data_share_name,
    });
    if let Some(endpoint) = cli.endpoint {
        config.api.endpoint = endpoint;
    }
    if let Some(api_version) = cli.api_version {
        config.api.api_version = api_version;
    }

    let account = match validate_config(&config) {
        Ok(account) => account,
        Err(errors) => return reject_config(&errors),
    };

    let token = auth::resolve_token(
        cli.access_token.as_deref(),
        &config.api.token_env,
        &config.api.endpoint,
    )?;
    tracing::info!(source = %token.source, "Access token acquired");

    let client = DataShareClient::new(account, &config.api, token)?;
    tracing::info!(account = %client.account_url(), "Building usage report");

    let report = generate_report(&client, Utc::now()).await?;
    let json = report.to_json_pretty()?;

    match cli.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// A missing identifier is a usage problem: print the first one and exit
/// cleanly. Any other invalid setting fails the run.
fn reject_config(errors: &[ValidationError]) -> datashare_report::Result<()> {
    if let Some(missing) = errors.iter().find(|e| e.is_account_field()) {
        println!("{}", missing);
        return Ok(());
    }

    let details = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(ReportError::Config(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(field: &str, message: &str) -> ValidationError {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_missing_identifier_exits_cleanly() {
        let errors = vec![
            error("resourceGroupName", "must be provided."),
            error("dataShareName", "must be provided."),
            error("api.timeout_secs", "must be greater than 0."),
        ];
        assert!(reject_config(&errors).is_ok());
    }

    #[test]
    fn test_invalid_api_settings_fail() {
        let errors = vec![error("api.timeout_secs", "must be greater than 0.")];
        let err = reject_config(&errors).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: api.timeout_secs must be greater than 0."
        );
    }
}
