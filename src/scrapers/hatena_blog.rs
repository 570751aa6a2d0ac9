//! Hatena Blog archive pages.
//!
//! Archive pages (`https://<blog>.hatenablog.com/archive/2025/06`) list entry
//! titles as `a.entry-title-link` anchors and link to older entries through a
//! pager. The pager is followed page by page until it disappears, a page
//! repeats, or `max_pages` pages have been read.

use super::parse_url;
use crate::error::FetchError;
use crate::http::{PageClient, PageRequest};
use crate::models::TitleRecord;
use crate::registry::Extractor;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

const BLOG_DOMAINS: [&str; 2] = ["hatenablog.com", "hateblo.jp"];

static ENTRY_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.entry-title-link").unwrap());
static NEXT_PAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.test-pager-next, .pager-next a").unwrap());

pub fn matches(url: &str) -> bool {
    parse_url(url).is_some_and(|u| {
        u.host_str().is_some_and(|host| {
            BLOG_DOMAINS
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
        })
    })
}

/// Titles found on one archive page plus the pager target, if any.
#[derive(Debug, Default, PartialEq)]
pub struct ArchivePage {
    pub records: Vec<TitleRecord>,
    pub next: Option<Url>,
}

/// Parse one archive page. Relative links resolve against `page_url`.
pub fn parse_archive_page(html: &str, page_url: &Url) -> ArchivePage {
    let document = Html::parse_document(html);

    let records = document
        .select(&ENTRY_TITLE)
        .filter_map(|a| {
            let title = a.text().collect::<String>().trim().to_string();
            let href = a.value().attr("href")?;
            let url = page_url.join(href).ok()?;
            if title.is_empty() {
                debug!(%url, "Skipping untitled entry link");
                return None;
            }
            Some(TitleRecord::new(title, url.to_string()))
        })
        .collect();

    let next = document
        .select(&NEXT_PAGE)
        .find_map(|a| a.value().attr("href"))
        .and_then(|href| page_url.join(href).ok());

    ArchivePage { records, next }
}

#[derive(Debug)]
pub struct HatenaBlog {
    max_pages: usize,
}

impl HatenaBlog {
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages: max_pages.max(1),
        }
    }
}

#[async_trait]
impl Extractor for HatenaBlog {
    #[instrument(level = "info", name = "hatena_blog", skip(self, client))]
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(Url::parse(url)?);

        while let Some(page_url) = next.take() {
            if !visited.insert(page_url.to_string()) {
                warn!(%page_url, "Pager points back to a visited page; stopping");
                break;
            }
            if visited.len() > self.max_pages {
                warn!(%page_url, max_pages = self.max_pages, "Page limit reached; stopping");
                break;
            }

            let html = client.fetch(&PageRequest::get(page_url.as_str())).await?;
            let page = parse_archive_page(&html, &page_url);
            debug!(%page_url, count = page.records.len(), next = ?page.next, "Parsed archive page");

            records.extend(page.records);
            next = page.next;
        }

        info!(pages = visited.len().min(self.max_pages), count = records.len(), "Collected archive titles");
        Ok(records)
    }
}
