// src/ingest/feed_xml.rs
//! RSS 2.0 and Atom parsing into a flat entry list.

use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime,
};

use crate::ingest::types::FetchError;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(rename = "link", default)]
    link: Vec<AtomLink>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@rel", default)]
    rel: Option<String>,
}

/// One syndication entry, format-independent. Text fields are raw (may hold HTML).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl FeedEntry {
    /// Published time, else updated time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.published.or(self.updated)
    }
}

/// Parse RFC 2822 (RSS) or RFC 3339 (Atom) timestamps.
pub fn parse_feed_date(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .ok()
        .and_then(|dt| DateTime::from_timestamp(dt.unix_timestamp(), 0))
        // obsolete zone names ("GMT", "EST") are only accepted by chrono
        .or_else(|| {
            DateTime::parse_from_rfc2822(ts)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Parse an RSS or Atom document. An empty channel is not an error.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let xml = scrub_html_entities_for_xml(xml);
    if looks_like_rss(&xml) {
        let rss: Rss = from_str(&xml).map_err(|e| FetchError::Parse(format!("rss: {e}")))?;
        Ok(rss.channel.item.into_iter().map(from_rss_item).collect())
    } else {
        let feed: AtomFeed =
            from_str(&xml).map_err(|e| FetchError::Parse(format!("atom: {e}")))?;
        Ok(feed.entry.into_iter().map(from_atom_entry).collect())
    }
}

fn looks_like_rss(xml: &str) -> bool {
    match (xml.find("<rss"), xml.find("<feed")) {
        (Some(r), Some(f)) => r < f,
        (Some(_), None) => true,
        _ => false,
    }
}

fn from_rss_item(it: Item) -> FeedEntry {
    FeedEntry {
        title: it.title,
        summary: it.description,
        link: it.link.map(|l| l.trim().to_string()),
        published: it.pub_date.as_deref().and_then(parse_feed_date),
        updated: None,
    }
}

fn from_atom_entry(e: AtomEntry) -> FeedEntry {
    // Prefer rel="alternate" (or no rel) over self/edit links.
    let link = e
        .link
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| e.link.first())
        .map(|l| l.href.trim().to_string());

    FeedEntry {
        title: e.title.map(|t| t.value),
        summary: e.summary.or(e.content).map(|t| t.value),
        link,
        published: e.published.as_deref().and_then(parse_feed_date),
        updated: e.updated.as_deref().and_then(parse_feed_date),
    }
}

/// quick-xml rejects HTML-only named entities; fold the common ones first.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
