//! Qiita per-user Atom feeds: `https://qiita.com/<user>/feed.atom`.

use super::{QIITA_HOST, feed, parse_url};
use crate::error::FetchError;
use crate::http::PageClient;
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use tracing::instrument;

pub fn matches(url: &str) -> bool {
    parse_url(url)
        .is_some_and(|u| u.host_str() == Some(QIITA_HOST) && u.path().ends_with("/feed.atom"))
}

#[derive(Debug, Default)]
pub struct QiitaFeed;

#[async_trait]
impl Extractor for QiitaFeed {
    #[instrument(level = "info", name = "qiita_feed", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        feed::fetch_feed(client, url, false).await
    }
}
