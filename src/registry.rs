//! Ordered registry of source extractors.
//!
//! A URL is dispatched to the first registration whose matcher accepts it,
//! so specific matchers must be registered before generic ones. The built-in
//! list is assembled explicitly by [`default_registry`].

use crate::config::FetchSettings;
use crate::error::FetchError;
use crate::http::PageClient;
use crate::models::TitleRecord;
use crate::scrapers::{
    adventar, hatena_blog, hatena_bookmark, note, qiita_advent_calendar, qiita_api, qiita_feed,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Source-specific logic turning one URL into title records.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        client: &dyn PageClient,
        url: &str,
    ) -> Result<Vec<TitleRecord>, FetchError>;
}

pub type Matcher = Box<dyn Fn(&str) -> bool + Send + Sync>;

pub struct Registration {
    pub name: String,
    /// Sample URL shown in help output.
    pub example: String,
    matcher: Matcher,
    extractor: Arc<dyn Extractor>,
}

impl Registration {
    pub fn matches(&self, url: &str) -> bool {
        (self.matcher)(url)
    }

    pub fn extractor(&self) -> &Arc<dyn Extractor> {
        &self.extractor
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("example", &self.example)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. Duplicate names are allowed; the earlier one wins.
    pub fn register<M>(
        &mut self,
        name: impl Into<String>,
        example: impl Into<String>,
        matcher: M,
        extractor: Arc<dyn Extractor>,
    ) -> &mut Self
    where
        M: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.entries.push(Registration {
            name: name.into(),
            example: example.into(),
            matcher: Box::new(matcher),
            extractor,
        });
        self
    }

    /// Find the first registration whose matcher accepts `url`.
    pub fn resolve(&self, url: &str) -> Result<&Registration, FetchError> {
        self.entries
            .iter()
            .find(|entry| entry.matches(url))
            .ok_or_else(|| FetchError::UnsupportedSource {
                url: url.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// `(name, example)` pairs for help text.
    pub fn help_entries(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.example.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the registry of built-in sources.
///
/// Order:
/// 1. Hatena Bookmark RSS
/// 2. Hatena Blog archive
/// 3. Adventar
/// 4. Qiita Advent Calendar
/// 5. note RSS
/// 6. Qiita feed
/// 7. Qiita API v2
pub fn default_registry(settings: &FetchSettings) -> Registry {
    let mut registry = Registry::new();
    registry
        .register(
            "はてなブックマークRSS",
            "https://b.hatena.ne.jp/entrylist/it.rss",
            hatena_bookmark::matches,
            Arc::new(hatena_bookmark::HatenaBookmark),
        )
        .register(
            "はてなブログ",
            "https://example.hatenablog.com/archive/2025",
            hatena_blog::matches,
            Arc::new(hatena_blog::HatenaBlog::new(settings.max_pages)),
        )
        .register(
            "Adventar",
            "https://adventar.org/calendars/11474",
            adventar::matches,
            Arc::new(adventar::Adventar),
        )
        .register(
            "Qiita Advent Calendar",
            "https://qiita.com/advent-calendar/2025/python",
            qiita_advent_calendar::matches,
            Arc::new(qiita_advent_calendar::QiitaAdventCalendar),
        )
        .register(
            "note RSS",
            "https://note.com/user/rss",
            note::matches,
            Arc::new(note::NoteRss),
        )
        .register(
            "Qiita RSS",
            "https://qiita.com/user/feed.atom",
            qiita_feed::matches,
            Arc::new(qiita_feed::QiitaFeed),
        )
        .register(
            "Qiita API v2",
            "https://qiita.com/api/v2/users/user/items",
            qiita_api::matches,
            Arc::new(qiita_api::QiitaApi::new(settings.qiita_access_token.clone())),
        );
    debug!(count = registry.len(), "Registered sources");
    registry
}

/// Resolve the extractor for `url` and drain all of its records.
#[instrument(level = "info", skip(registry, client))]
pub async fn fetch_titles(
    registry: &Registry,
    client: &dyn PageClient,
    url: &str,
) -> Result<Vec<TitleRecord>, FetchError> {
    let entry = registry.resolve(url)?;
    info!(source = %entry.name, "Resolved source");
    let records = entry.extractor().extract(client, url).await?;
    info!(source = %entry.name, count = records.len(), "Fetched titles");
    Ok(records)
}
