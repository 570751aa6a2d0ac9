//! Source scrapers producing [`TitleRecord`](crate::models::TitleRecord)s.
//!
//! Each submodule covers one platform and exports:
//! - `matches(url)`: whether the scraper handles the URL
//! - an extractor type implementing [`Extractor`](crate::registry::Extractor)
//!
//! Parsing lives in plain functions over the fetched text, separate from the
//! network call, so every format can be exercised with canned pages.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Hatena Bookmark | [`hatena_bookmark`] | RSS 1.0 / 2.0 | Keeps entry descriptions |
//! | Hatena Blog | [`hatena_blog`] | HTML scraping | Follows the archive pager |
//! | Adventar | [`adventar`] | HTML scraping | Days without an article are skipped |
//! | Qiita Advent Calendar | [`qiita_advent_calendar`] | JSON inside `<script>` | Lenient: bad JSON means no records |
//! | note | [`note`] | RSS 2.0 | |
//! | Qiita | [`qiita_feed`] | Atom | |
//! | Qiita API v2 | [`qiita_api`] | REST | Single page, `per_page=20` |

pub mod adventar;
pub mod feed;
pub mod hatena_blog;
pub mod hatena_bookmark;
pub mod note;
pub mod qiita_advent_calendar;
pub mod qiita_api;
pub mod qiita_feed;

use url::Url;

pub(crate) const QIITA_HOST: &str = "qiita.com";

/// Parse a URL for matching; anything unparseable matches nothing.
pub(crate) fn parse_url(url: &str) -> Option<Url> {
    Url::parse(url).ok()
}
