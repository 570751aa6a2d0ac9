//! note (note.com) user feeds: `https://note.com/<user>/rss`.

use super::{feed, parse_url};
use crate::error::FetchError;
use crate::http::PageClient;
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use tracing::instrument;

pub fn matches(url: &str) -> bool {
    parse_url(url).is_some_and(|u| u.host_str() == Some("note.com") && u.path().ends_with("/rss"))
}

#[derive(Debug, Default)]
pub struct NoteRss;

#[async_trait]
impl Extractor for NoteRss {
    #[instrument(level = "info", name = "note_rss", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        feed::fetch_feed(client, url, false).await
    }
}
