//! Data models shared by the scrapers and the output writers.
//!
//! Every source, whatever its upstream format, is normalized into a
//! [`TitleRecord`]. Records are produced by the extractors in
//! [`crate::scrapers`] and consumed by [`crate::outputs`].

use serde::{Deserialize, Serialize};

/// A single article as listed by one of the supported sources.
///
/// Field order is significant: it is the key order of the JSON-lines output
/// (`title`, `url`, then `description` when present).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TitleRecord {
    /// The article title as shown by the source.
    pub title: String,
    /// Absolute URL of the article.
    pub url: String,
    /// Short description, only provided by bookmark feeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TitleRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: None,
        }
    }

    /// Attach a description; empty strings are treated as absent.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}
