//! Data Share management API client
//!
//! Issues the two list operations the report needs, one page per call:
//! - `GET  .../accounts/{account}/shares`
//! - `POST .../accounts/{account}/shares/{share}/listSynchronizations`

use super::models::{Share, ShareSynchronization};
use super::ShareSource;
use crate::auth::AccessToken;
use crate::config::{ApiConfig, ShareAccount};
use crate::pagination::{Page, SKIP_TOKEN_PARAM};
use crate::{ReportError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one Data Share account
pub struct DataShareClient {
    client: Client,
    account: ShareAccount,
    account_url: String,
    api_version: String,
    auth_token: String,
}

impl DataShareClient {
    /// Create a new client
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(account: ShareAccount, api: &ApiConfig, token: AccessToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static(concat!(
                        "datashare-report/",
                        env!("CARGO_PKG_VERSION")
                    )),
                );
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        let account_url = format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DataShare/accounts/{}",
            api.endpoint.trim_end_matches('/'),
            urlencoding::encode(&account.subscription_id),
            urlencoding::encode(&account.resource_group_name),
            urlencoding::encode(&account.data_share_name),
        );

        debug!(account_url = %account_url, token_source = %token.source, "Data Share client ready");

        Ok(Self {
            client,
            account,
            account_url,
            api_version: api.api_version.clone(),
            auth_token: token.token,
        })
    }

    pub fn account(&self) -> &ShareAccount {
        &self.account
    }

    pub fn account_url(&self) -> &str {
        &self.account_url
    }

    /// One page of the account's sent shares
    pub async fn list_shares_page(&self, skip_token: Option<String>) -> Result<Page<Share>> {
        let url = format!("{}/shares", self.account_url);
        debug!(skip_token = ?skip_token, "Listing shares");

        let request = self.client.get(&url);
        self.send_page(request, skip_token, "shares").await
    }

    /// One page of a share's synchronization history
    pub async fn list_synchronizations_page(
        &self,
        share_name: &str,
        skip_token: Option<String>,
    ) -> Result<Page<ShareSynchronization>> {
        let url = format!(
            "{}/shares/{}/listSynchronizations",
            self.account_url,
            urlencoding::encode(share_name)
        );
        debug!(share = %share_name, skip_token = ?skip_token, "Listing synchronizations");

        // ARM rejects body-less POSTs without a length.
        let request = self.client.post(&url).header(header::CONTENT_LENGTH, 0);
        self.send_page(request, skip_token, share_name).await
    }

    async fn send_page<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        skip_token: Option<String>,
        what: &str,
    ) -> Result<Page<T>> {
        let mut params = vec![("api-version", self.api_version.clone())];
        if let Some(token) = skip_token {
            params.push((SKIP_TOKEN_PARAM, token));
        }

        let response = request
            .query(&params)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let status = response.status();
                let error_body = response.text().await.unwrap_or_default();
                Err(ReportError::Auth(format!(
                    "Data Share API rejected the token listing {}: HTTP {}: {}",
                    what, status, error_body
                )))
            }
            StatusCode::NOT_FOUND => Err(ReportError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("not found: {} under {}", what, self.account_url),
            }),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(ReportError::Api {
                    status: status.as_u16(),
                    body: error_body,
                })
            }
        }
    }
}

#[async_trait]
impl ShareSource for DataShareClient {
    async fn list_shares(&self, skip_token: Option<String>) -> Result<Page<Share>> {
        self.list_shares_page(skip_token).await
    }

    async fn list_synchronizations(
        &self,
        share_name: &str,
        skip_token: Option<String>,
    ) -> Result<Page<ShareSynchronization>> {
        self.list_synchronizations_page(share_name, skip_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenSource;
    use crate::pagination::get_all_pages;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    const PREFIX: &str =
        "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.DataShare/accounts/acct";

    fn account() -> ShareAccount {
        ShareAccount {
            subscription_id: "sub-1".to_string(),
            resource_group_name: "rg-1".to_string(),
            data_share_name: "acct".to_string(),
        }
    }

    fn token(value: &str) -> AccessToken {
        AccessToken {
            token: value.to_string(),
            source: TokenSource::Explicit,
        }
    }

    fn client_for(base: &str, bearer: &str) -> DataShareClient {
        let api = ApiConfig {
            endpoint: base.to_string(),
            timeout_secs: 5,
            ..ApiConfig::default()
        };
        DataShareClient::new(account(), &api, token(bearer)).unwrap()
    }

    fn next_link(token: &str) -> String {
        format!(
            "https://management.azure.com{}/shares?api-version=2019-11-01&$skipToken={}",
            PREFIX, token
        )
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "Bearer test-token")
            .unwrap_or(false)
    }

    async fn list_shares(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (AxumStatus::UNAUTHORIZED, Json(json!({"error": "no"})));
        }
        assert_eq!(params.get("api-version").map(String::as_str), Some("2019-11-01"));

        let body = match params.get("$skipToken").map(String::as_str) {
            None => json!({
                "value": [{"name": "Share1"}, {"name": "My Share"}],
                "nextLink": next_link("page2"),
            }),
            Some("page2") => json!({ "value": [{"name": "Share3"}] }),
            Some(other) => panic!("unexpected skip token {}", other),
        };
        (AxumStatus::OK, Json(body))
    }

    async fn list_synchronizations(
        Path(share): Path<String>,
        headers: HeaderMap,
    ) -> (AxumStatus, Json<Value>) {
        assert!(authorized(&headers));
        match share.as_str() {
            "My Share" => (
                AxumStatus::OK,
                Json(json!({
                    "value": [{
                        "consumerTenantName": "Contoso",
                        "startTime": "2026-10-01T08:00:00Z",
                        "status": "Succeeded"
                    }]
                })),
            ),
            "Broken" => (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"code": "InternalError"}})),
            ),
            _ => (AxumStatus::OK, Json(json!({ "value": [] }))),
        }
    }

    async fn spawn_server() -> String {
        let router = Router::new()
            .route(&format!("{}/shares", PREFIX), get(list_shares))
            .route(
                &format!("{}/shares/{{share}}/listSynchronizations", PREFIX),
                post(list_synchronizations),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_account_url() {
        let client = client_for("https://management.azure.com/", "t");
        assert_eq!(
            client.account_url(),
            format!("https://management.azure.com{}", PREFIX)
        );
        assert_eq!(client.account().data_share_name, "acct");
    }

    #[tokio::test]
    async fn test_list_shares_follows_skip_token() {
        let base = spawn_server().await;
        let client = client_for(&base, "test-token");

        let shares = get_all_pages(|cursor| client.list_shares_page(cursor))
            .await
            .unwrap();

        let names: Vec<_> = shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Share1", "My Share", "Share3"]);
    }

    #[tokio::test]
    async fn test_list_synchronizations_encodes_share_name() {
        let base = spawn_server().await;
        let client = client_for(&base, "test-token");

        let page = client
            .list_synchronizations_page("My Share", None)
            .await
            .unwrap();

        assert_eq!(page.value.len(), 1);
        assert_eq!(page.value[0].consumer_tenant_name.as_deref(), Some("Contoso"));
        assert!(page.next_link.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let base = spawn_server().await;
        let client = client_for(&base, "wrong-token");

        let err = client.list_shares_page(None).await.unwrap_err();
        assert!(matches!(err, ReportError::Auth(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let base = spawn_server().await;
        let client = client_for(&base, "test-token");

        let err = client
            .list_synchronizations_page("Broken", None)
            .await
            .unwrap_err();
        match err {
            ReportError::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("InternalError"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_route_maps_to_not_found() {
        let base = spawn_server().await;
        let api = ApiConfig {
            endpoint: format!("{}/elsewhere", base),
            ..ApiConfig::default()
        };
        let client = DataShareClient::new(account(), &api, token("test-token")).unwrap();

        let err = client.list_shares_page(None).await.unwrap_err();
        assert!(matches!(err, ReportError::Api { status: 404, .. }));
    }
}
