// src/ingest/providers/feed.rs
use async_trait::async_trait;
use chrono::Utc;

use crate::config::ScrapingCfg;
use crate::ingest::feed_xml::parse_feed;
use crate::ingest::types::{ContentType, FetchError, RawDocument, SourceAdapter};
use crate::ingest::{http_client, normalize_text, send_for_text, window_start};

/// Syndication feed reader (RSS 2.0 or Atom) for one configured source.
pub struct FeedAdapter {
    name: String,
    mode: Mode,
    max_entries: usize,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl FeedAdapter {
    pub fn from_url(name: &str, url: &str, scraping: &ScrapingCfg) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Http {
                url: url.to_string(),
                client: http_client(scraping),
            },
            max_entries: scraping.max_entries_per_source,
        }
    }

    /// Serve a fixed XML document instead of hitting the network.
    pub fn from_fixture(name: &str, xml: &str) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Fixture(xml.to_string()),
            max_entries: ScrapingCfg::default().max_entries_per_source,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    fn documents_from_str(&self, xml: &str, lookback_days: u32) -> Result<Vec<RawDocument>, FetchError> {
        let entries = parse_feed(xml)?;
        if entries.is_empty() {
            tracing::info!(source = %self.name, "feed has no entries");
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let cutoff = window_start(now, lookback_days);

        let mut out = Vec::new();
        for entry in entries.into_iter().take(self.max_entries) {
            let (published_at, published_estimated) = match entry.timestamp() {
                Some(ts) => (ts, false),
                None => (now, true),
            };
            if !published_estimated && published_at < cutoff {
                continue;
            }

            let title = entry
                .title
                .as_deref()
                .map(normalize_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "No title".to_string());
            let summary = entry.summary.as_deref().map(normalize_text).unwrap_or_default();

            out.push(RawDocument {
                body: format!("{summary} {title}"),
                title,
                summary,
                url: entry.link.unwrap_or_default(),
                published_at,
                published_estimated,
                kind: ContentType::Feed,
                authors: Vec::new(),
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl SourceAdapter for FeedAdapter {
    async fn fetch(&self, lookback_days: u32) -> Result<Vec<RawDocument>, FetchError> {
        match &self.mode {
            Mode::Fixture(xml) => self.documents_from_str(xml, lookback_days),
            Mode::Http { url, client } => {
                let body = send_for_text(client.get(url.as_str())).await?;
                self.documents_from_str(&body, lookback_days)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ContentType {
        ContentType::Feed
    }
}
