//! Qiita Advent Calendar pages.
//!
//! The calendar page is rendered client side; its data ships as a JSON blob
//! inside a `<script>` tag. [`embedded_payload`] is the only place that knows
//! which tag holds it, so a markup change upstream only touches that function.
//! A page without a usable payload produces no records rather than an error.

use super::{QIITA_HOST, parse_url};
use crate::error::FetchError;
use crate::http::{PageClient, PageRequest};
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Script tags that have carried the calendar payload, newest markup last.
static PAYLOAD_SCRIPTS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "script#js-react-on-rails-context",
        "script[data-js-react-on-rails-store]",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

const PAYLOAD_ROOT: &str = "advencalApp";

pub fn matches(url: &str) -> bool {
    parse_url(url)
        .is_some_and(|u| u.host_str() == Some(QIITA_HOST) && u.path().contains("/advent-calendar/"))
}

/// Locate the JSON blob holding the calendar.
pub fn embedded_payload(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);

    PAYLOAD_SCRIPTS
        .iter()
        .flat_map(|selector| document.select(selector))
        .find_map(|script| {
            let text = script.text().collect::<String>();
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(value) if value.get(PAYLOAD_ROOT).is_some() => Some(value),
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "Embedded calendar JSON is malformed");
                    None
                }
            }
        })
}

/// Collect records from `advencalApp.calendar.items`.
///
/// Nested arrays are flattened; days without an article are skipped.
pub fn calendar_records(payload: &Value) -> Vec<TitleRecord> {
    let mut records = Vec::new();
    if let Some(items) = payload.pointer("/advencalApp/calendar/items") {
        collect_items(items, &mut records);
    }
    records
}

fn collect_items(value: &Value, records: &mut Vec<TitleRecord>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_items(item, records)),
        Value::Object(item) => {
            let Some(article) = item.get("article").filter(|a| a.is_object()) else {
                return;
            };
            let title = article.get("title").and_then(Value::as_str).map(str::trim);
            let url = article.get("url").and_then(Value::as_str).map(str::trim);
            match (title, url) {
                (Some(title), Some(url)) if !title.is_empty() && !url.is_empty() => {
                    records.push(TitleRecord::new(title, url));
                }
                _ => debug!(?article, "Skipping article without title or url"),
            }
        }
        _ => {}
    }
}

pub fn parse_calendar(html: &str) -> Vec<TitleRecord> {
    match embedded_payload(html) {
        Some(payload) => calendar_records(&payload),
        None => {
            warn!("No calendar payload found in page");
            Vec::new()
        }
    }
}

#[derive(Debug, Default)]
pub struct QiitaAdventCalendar;

#[async_trait]
impl Extractor for QiitaAdventCalendar {
    #[instrument(level = "info", name = "qiita_advent_calendar", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        let html = client.fetch(&PageRequest::get(url)).await?;
        let records = parse_calendar(&html);
        info!(count = records.len(), "Parsed advent calendar");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StaticClient;

    const URL: &str = "https://qiita.com/advent-calendar/2025/python-type-hints";

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script id="js-react-on-rails-context" type="application/json">
{
  "advencalApp": {
    "calendar": {
      "items": [
        {
          "date": 1,
          "article": {
            "title": "Python型ヒントの基礎",
            "url": "https://qiita.com/user1/items/abc123"
          }
        },
        {
          "date": 2,
          "article": {
            "title": "Genericsを使いこなす",
            "url": "https://qiita.com/user2/items/def456"
          }
        },
        {
          "date": 3,
          "comment": "記事なし"
        }
      ]
    }
  }
}
</script>
</head>
<body>
</body>
</html>"#;

    #[test]
    fn test_matches() {
        assert!(matches(URL));
        assert!(!matches("https://qiita.com/ftnext/feed.atom"));
        assert!(!matches("https://adventar.org/advent-calendar/2025"));
    }

    #[tokio::test]
    async fn test_skips_days_without_article() {
        let client = StaticClient::new().page(URL, PAGE);
        let records = QiitaAdventCalendar.extract(&client, URL).await.unwrap();

        assert_eq!(
            records,
            vec![
                TitleRecord::new("Python型ヒントの基礎", "https://qiita.com/user1/items/abc123"),
                TitleRecord::new("Genericsを使いこなす", "https://qiita.com/user2/items/def456"),
            ]
        );
    }

    #[test]
    fn test_nested_item_arrays_and_data_attribute() {
        let html = r#"<html><body>
<script type="application/json" data-js-react-on-rails-store="AppStoreWithReactOnRails">
{"advencalApp": {"calendar": {"items": [
  [{"article": {"title": "A", "url": "https://qiita.com/a"}}, {"article": null}],
  [{"article": {"title": "B", "url": "https://qiita.com/b"}}]
]}}}
</script></body></html>"#;
        let titles: Vec<_> = parse_calendar(html).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_malformed_payload_yields_nothing() {
        let html = r#"<script id="js-react-on-rails-context">{"advencalApp": </script>"#;
        assert!(embedded_payload(html).is_none());
        assert!(parse_calendar(html).is_empty());
    }

    #[test]
    fn test_missing_payload_yields_nothing() {
        assert!(parse_calendar("<html><body><p>maintenance</p></body></html>").is_empty());
    }

    #[test]
    fn test_article_missing_url_is_skipped() {
        let payload = serde_json::json!({
            "advencalApp": {"calendar": {"items": [
                {"article": {"title": "no url"}},
                {"article": {"title": "ok", "url": "https://qiita.com/ok"}}
            ]}}
        });
        assert_eq!(calendar_records(&payload), vec![TitleRecord::new("ok", "https://qiita.com/ok")]);
    }
}
