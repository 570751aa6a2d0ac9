//! Adventar calendars (`https://adventar.org/calendars/<id>`).
//!
//! Each calendar day is an `li.item`. Days with a registered article carry an
//! `.article` block holding the link and, beside it, the article title.

use super::parse_url;
use crate::error::FetchError;
use crate::http::{PageClient, PageRequest};
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

static DAY: Lazy<Selector> = Lazy::new(|| Selector::parse("li.item").unwrap());
static ARTICLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".article .link a[href]").unwrap());
static ARTICLE_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".article .left > div:not(.link)").unwrap());

pub fn matches(url: &str) -> bool {
    parse_url(url).is_some_and(|u| {
        u.host_str() == Some("adventar.org") && u.path().starts_with("/calendars/")
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn parse_calendar(html: &str) -> Vec<TitleRecord> {
    let document = Html::parse_document(html);

    document
        .select(&DAY)
        .filter_map(|day| {
            let href = day.select(&ARTICLE_LINK).next()?.value().attr("href")?;
            let title = day
                .select(&ARTICLE_TITLE)
                .map(text_of)
                .find(|t| !t.is_empty());
            match title {
                Some(title) => Some(TitleRecord::new(title, href.trim())),
                None => {
                    debug!(%href, "Skipping article without a title");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct Adventar;

#[async_trait]
impl Extractor for Adventar {
    #[instrument(level = "info", name = "adventar", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        let html = client.fetch(&PageRequest::get(url)).await?;
        let records = parse_calendar(&html);
        info!(count = records.len(), "Parsed Adventar calendar");
        Ok(records)
    }
}
