//! Syndication feed parsing shared by the RSS/Atom scrapers.
//!
//! One permissive document shape covers the three formats we meet:
//!
//! - RSS 2.0: `<rss><channel><item>…</item></channel></rss>`
//! - RSS 1.0 (RDF, used by Hatena Bookmark): `<rdf:RDF><channel/><item>…</item></rdf:RDF>`
//! - Atom (used by Qiita): `<feed><entry>…</entry></feed>`

use crate::error::FetchError;
use crate::http::{PageClient, PageRequest};
use crate::models::TitleRecord;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// A feed item reduced to the fields we care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    channel: Option<Channel>,
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl From<RssItem> for FeedEntry {
    fn from(item: RssItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            description: item.description,
        }
    }
}

impl From<AtomEntry> for FeedEntry {
    fn from(entry: AtomEntry) -> Self {
        // rel defaults to "alternate" when omitted
        let alternate = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
            .or_else(|| entry.links.first())
            .and_then(|l| l.href.clone());
        Self {
            title: entry.title,
            link: alternate,
            description: entry.summary,
        }
    }
}

/// Parse an RSS 2.0, RSS 1.0 or Atom document, keeping document order.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let doc: FeedDocument = quick_xml::de::from_str(xml)?;

    let mut entries = Vec::new();
    if let Some(channel) = doc.channel {
        entries.extend(channel.items.into_iter().map(FeedEntry::from));
    }
    entries.extend(doc.items.into_iter().map(FeedEntry::from));
    entries.extend(doc.entries.into_iter().map(FeedEntry::from));
    Ok(entries)
}

/// Turn feed entries into records, skipping entries without a title or link.
pub fn entries_to_records(entries: Vec<FeedEntry>, keep_description: bool) -> Vec<TitleRecord> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let title = non_empty(entry.title);
            let link = non_empty(entry.link);
            match (title, link) {
                (Some(title), Some(link)) => {
                    let description = if keep_description {
                        entry.description.map(|d| d.trim().to_string())
                    } else {
                        None
                    };
                    Some(TitleRecord::new(title, link).with_description(description))
                }
                (title, link) => {
                    debug!(?title, ?link, "Skipping incomplete feed entry");
                    None
                }
            }
        })
        .collect()
}

/// Fetch a feed and convert its entries.
#[instrument(level = "info", skip(client))]
pub async fn fetch_feed(
    client: &dyn PageClient,
    url: &str,
    keep_description: bool,
) -> Result<Vec<TitleRecord>, FetchError> {
    let xml = client.fetch(&PageRequest::get(url)).await?;
    let entries = parse_feed(&xml)?;
    let records = entries_to_records(entries, keep_description);
    info!(count = records.len(), "Parsed feed entries");
    Ok(records)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const HATENA_BOOKMARK_RSS2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>はてなブックマーク - IT</title>
    <link>https://b.hatena.ne.jp/entrylist/it</link>
    <item>
      <title>Sample Article 1</title>
      <link>https://example.com/article1</link>
      <description>This is a sample article description 1</description>
    </item>
    <item>
      <title>Sample Article 2</title>
      <link>https://example.com/article2</link>
      <description>This is a sample article description 2</description>
    </item>
  </channel>
</rss>"#;

    pub const HATENA_BOOKMARK_RDF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns="http://purl.org/rss/1.0/" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://b.hatena.ne.jp/entrylist/it">
    <title>はてなブックマーク - IT</title>
    <link>https://b.hatena.ne.jp/entrylist/it</link>
    <items>
      <rdf:Seq>
        <rdf:li rdf:resource="https://example.com/article1"/>
        <rdf:li rdf:resource="https://example.com/article2"/>
      </rdf:Seq>
    </items>
  </channel>
  <item rdf:about="https://example.com/article1">
    <title>RDF Article 1</title>
    <link>https://example.com/article1</link>
    <description>説明1</description>
    <dc:date>2025-01-14T10:00:00+09:00</dc:date>
  </item>
  <item rdf:about="https://example.com/article2">
    <title>RDF Article 2</title>
    <link>https://example.com/article2</link>
    <description>説明2</description>
    <dc:date>2025-01-14T11:00:00+09:00</dc:date>
  </item>
</rdf:RDF>"#;

    pub const NOTE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>ftnext｜note</title>
    <link>https://note.com/ftnext</link>
    <description>ftnextさんの最近の記事</description>
    <item>
      <title>noteの記事タイトル1</title>
      <link>https://note.com/ftnext/n/n1234567890ab</link>
      <description>記事の説明1</description>
    </item>
    <item>
      <title>noteの記事タイトル2</title>
      <link>https://note.com/ftnext/n/ncdef01234567</link>
      <description>記事の説明2</description>
    </item>
  </channel>
</rss>"#;

    pub const QIITA_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xml:lang="ja-JP" xmlns="http://www.w3.org/2005/Atom">
  <id>tag:qiita.com,2005:/ftnext/feed</id>
  <link rel="alternate" type="text/html" href="https://qiita.com"/>
  <link rel="self" type="application/atom+xml" href="https://qiita.com/ftnext/feed.atom"/>
  <title>ftnextの記事 - Qiita</title>
  <updated>2022-10-01T19:34:17+09:00</updated>
  <entry>
    <id>tag:qiita.com,2005:PublicArticle/1627276</id>
    <published>2025-01-14T10:00:00Z</published>
    <updated>2025-01-14T10:00:00Z</updated>
    <link rel="alternate" type="text/html" href="https://qiita.com/ftnext/items/abc123"/>
    <url>https://qiita.com/ftnext/items/abc123</url>
    <title>Sample Qiita Article 1</title>
    <content type="text">1行目
2行目...</content>
    <author>
      <name>ftnext</name>
    </author>
  </entry>
  <entry>
    <id>tag:qiita.com,2005:PublicArticle/1567368</id>
    <published>2022-10-01T19:34:17+09:00</published>
    <updated>2022-10-08T17:23:09+09:00</updated>
    <link rel="alternate" href="https://qiita.com/ftnext/items/def456"/>
    <url>https://qiita.com/ftnext/items/def456</url>
    <title>Sample Qiita Article 2</title>
    <content type="text">こんにちは
この記事は...</content>
  </entry>
</feed>"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_rss2() {
        let entries = parse_feed(HATENA_BOOKMARK_RSS2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Sample Article 1"));
        assert_eq!(entries[0].link.as_deref(), Some("https://example.com/article1"));
        assert_eq!(
            entries[1].description.as_deref(),
            Some("This is a sample article description 2")
        );
    }

    #[test]
    fn test_parse_rss1_items_beside_channel() {
        let entries = parse_feed(HATENA_BOOKMARK_RDF).unwrap();
        let titles: Vec<_> = entries.iter().filter_map(|e| e.title.as_deref()).collect();
        assert_eq!(titles, vec!["RDF Article 1", "RDF Article 2"]);
        assert_eq!(entries[1].description.as_deref(), Some("説明2"));
    }

    #[test]
    fn test_parse_atom_uses_alternate_link() {
        let entries = parse_feed(QIITA_ATOM).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Sample Qiita Article 1"));
        assert_eq!(
            entries[0].link.as_deref(),
            Some("https://qiita.com/ftnext/items/abc123")
        );
        assert_eq!(
            entries[1].link.as_deref(),
            Some("https://qiita.com/ftnext/items/def456")
        );
    }

    #[test]
    fn test_atom_link_without_rel() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>No rel</title>
    <link rel="self" href="https://example.com/self"/>
    <link href="https://example.com/post"/>
  </entry>
</feed>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].link.as_deref(), Some("https://example.com/post"));
    }

    #[test]
    fn test_cdata_and_entities() {
        let xml = r#"<rss version="2.0"><channel>
  <item>
    <title>Tom &amp; Jerry</title>
    <link>https://example.com/tj</link>
    <description><![CDATA[<p>html</p>]]></description>
  </item>
</channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].title.as_deref(), Some("Tom & Jerry"));
        assert_eq!(entries[0].description.as_deref(), Some("<p>html</p>"));
    }

    #[test]
    fn test_malformed_feed_is_error() {
        let err = parse_feed("<rss><channel><item></channel>").unwrap_err();
        assert!(matches!(err, FetchError::Feed(_)));
    }

    #[test]
    fn test_entries_to_records_skips_incomplete() {
        let entries = vec![
            FeedEntry {
                title: Some("kept".into()),
                link: Some("https://example.com/1".into()),
                description: Some("d".into()),
            },
            FeedEntry {
                title: None,
                link: Some("https://example.com/2".into()),
                description: None,
            },
            FeedEntry {
                title: Some("  ".into()),
                link: Some("https://example.com/3".into()),
                description: None,
            },
            FeedEntry {
                title: Some("no link".into()),
                link: None,
                description: None,
            },
        ];
        let records = entries_to_records(entries.clone(), false);
        assert_eq!(records, vec![TitleRecord::new("kept", "https://example.com/1")]);

        let records = entries_to_records(entries, true);
        assert_eq!(records[0].description.as_deref(), Some("d"));
    }
}
