//! Cursor pagination
//!
//! Azure management list operations return one page at a time as
//! `{ "value": [...], "nextLink": "<uri>" }`. The next page is requested by
//! echoing the `$skipToken` query parameter of `nextLink` back to the same
//! operation. [`get_all_pages`] drains such an operation into a single `Vec`.
//!
//! # Trust boundary
//!
//! There is no page cap. The drain ends only when the service stops sending a
//! continuation token, so a service that always returns one keeps the loop
//! running until a fetch fails.

use crate::{ReportError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info};

/// Query parameter carrying the continuation cursor
pub const SKIP_TOKEN_PARAM: &str = "$skipToken";

/// One page of a list operation
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    pub fn new(value: Vec<T>, next_link: Option<String>) -> Self {
        Self { value, next_link }
    }

    /// A page with no continuation
    pub fn last(value: Vec<T>) -> Self {
        Self::new(value, None)
    }
}

/// Read the `$skipToken` cursor out of a page's `nextLink`.
///
/// A missing or empty link, or a link without a non-empty token, means there
/// are no more pages. Parameter names compare case-insensitively since some
/// services send `$skiptoken`.
pub fn extract_skip_token(next_link: Option<&str>) -> Result<Option<String>> {
    let Some(link) = next_link.filter(|l| !l.trim().is_empty()) else {
        return Ok(None);
    };

    let url = Url::parse(link).map_err(|e| {
        ReportError::Pagination(format!("Invalid nextLink '{}': {}", link, e))
    })?;

    Ok(url
        .query_pairs()
        .find(|(key, _)| key.eq_ignore_ascii_case(SKIP_TOKEN_PARAM))
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty()))
}

/// Fetch every page of a list operation, in order.
///
/// `fetch` is called with `None` for the first page and with the extracted
/// skip token for each following one. Items keep page order and in-page
/// order. The first fetch error is returned as-is and everything collected
/// so far is dropped.
pub async fn get_all_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let kind = element_kind::<T>();
    let mut results = Vec::new();
    let mut skip_token: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        pages += 1;
        info!(kind, page = pages, "Retrieving page");

        let Page { value, next_link } = fetch(skip_token.take()).await?;
        results.extend(value);

        skip_token = extract_skip_token(next_link.as_deref())?;
        if skip_token.is_none() {
            break;
        }
    }

    debug!(kind, pages, items = results.len(), "All pages retrieved");
    Ok(results)
}

/// Short type name used in progress logs ("Share", not the full path)
fn element_kind<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
