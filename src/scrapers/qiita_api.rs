//! Qiita API v2 (`https://qiita.com/api/v2/users/<user>/items`).
//!
//! A single page of `per_page=20` items is read; there is no pagination.
//! Requests are anonymous unless an access token is configured.

use super::{QIITA_HOST, parse_url};
use crate::error::FetchError;
use crate::http::{PageClient, PageRequest};
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

pub const PER_PAGE: u32 = 20;

pub fn matches(url: &str) -> bool {
    parse_url(url)
        .is_some_and(|u| u.host_str() == Some(QIITA_HOST) && u.path().contains("/api/v2/users/"))
}

/// The subset of a Qiita item we read. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct ApiItem {
    title: Option<String>,
    url: Option<String>,
}

/// Parse the JSON array returned by the items endpoint.
pub fn parse_items(body: &str) -> Result<Vec<TitleRecord>, FetchError> {
    let items: Vec<ApiItem> = serde_json::from_str(body)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match (item.title, item.url) {
            (Some(title), Some(url)) => Some(TitleRecord::new(title, url)),
            (title, url) => {
                debug!(?title, ?url, "Skipping incomplete API item");
                None
            }
        })
        .collect())
}

#[derive(Debug, Default)]
pub struct QiitaApi {
    access_token: Option<String>,
}

impl QiitaApi {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }
}

#[async_trait]
impl Extractor for QiitaApi {
    #[instrument(level = "info", name = "qiita_api", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        let request = PageRequest::get(url)
            .query("per_page", PER_PAGE.to_string())
            .bearer(self.access_token.clone());
        let body = client.fetch(&request).await?;
        let records = parse_items(&body)?;
        info!(count = records.len(), "Parsed Qiita API items");
        Ok(records)
    }
}
