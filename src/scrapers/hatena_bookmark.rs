//! Hatena Bookmark entry-list feeds.
//!
//! `https://b.hatena.ne.jp/entrylist/<category>.rss` lists popular bookmarks.
//! Unlike the other feeds, the entry description is kept because the
//! bookmarked pages are not written by one author and the title alone says
//! little.

use super::{feed, parse_url};
use crate::error::FetchError;
use crate::http::PageClient;
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use tracing::instrument;

const HOST: &str = "b.hatena.ne.jp";

pub fn matches(url: &str) -> bool {
    parse_url(url).is_some_and(|u| {
        u.host_str() == Some(HOST)
            && u.path().starts_with("/entrylist/")
            && u.path().ends_with(".rss")
    })
}

#[derive(Debug, Default)]
pub struct HatenaBookmark;

#[async_trait]
impl Extractor for HatenaBookmark {
    #[instrument(level = "info", name = "hatena_bookmark", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        feed::fetch_feed(client, url, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StaticClient;
    use crate::scrapers::feed::fixtures::{HATENA_BOOKMARK_RDF, HATENA_BOOKMARK_RSS2};
    use reqwest::StatusCode;

    const URL: &str = "https://b.hatena.ne.jp/entrylist/it.rss";

    #[test]
    fn test_matches() {
        assert!(matches(URL));
        assert!(matches("https://b.hatena.ne.jp/entrylist/general.rss?sort=hot"));
        assert!(!matches("https://b.hatena.ne.jp/entrylist/it"));
        assert!(!matches("https://b.hatena.ne.jp/hotentry/it.rss"));
        assert!(!matches("https://hatena.ne.jp/entrylist/it.rss"));
        assert!(!matches("not a url"));
    }

    #[tokio::test]
    async fn test_fetch_keeps_description() {
        let client = StaticClient::new().page(URL, HATENA_BOOKMARK_RSS2);
        let records = HatenaBookmark.extract(&client, URL).await.unwrap();

        assert_eq!(
            records,
            vec![
                TitleRecord::new("Sample Article 1", "https://example.com/article1")
                    .with_description(Some("This is a sample article description 1".into())),
                TitleRecord::new("Sample Article 2", "https://example.com/article2")
                    .with_description(Some("This is a sample article description 2".into())),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_rdf_feed() {
        let client = StaticClient::new().page(URL, HATENA_BOOKMARK_RDF);
        let records = HatenaBookmark.extract(&client, URL).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "RDF Article 1");
        assert_eq!(records[0].description.as_deref(), Some("説明1"));
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let client = StaticClient::new().status(URL, StatusCode::SERVICE_UNAVAILABLE);
        let err = HatenaBookmark.extract(&client, URL).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { .. }));
    }
}
