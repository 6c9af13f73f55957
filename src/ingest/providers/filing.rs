// src/ingest/providers/filing.rs
use async_trait::async_trait;
use chrono::Utc;

use crate::config::ScrapingCfg;
use crate::ingest::feed_xml::parse_feed;
use crate::ingest::types::{ContentType, FetchError, RawDocument, SourceAdapter};
use crate::ingest::{http_client, normalize_text, send_for_text, truncate_summary};

pub const FILING_SUMMARY_MAX: usize = 500;

/// Regulatory filing listing (EDGAR `browse-edgar` Atom output) for one form type.
pub struct FilingAdapter {
    name: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http {
        endpoint: String,
        filing_type: String,
        count: u32,
        client: reqwest::Client,
    },
}

impl FilingAdapter {
    pub fn from_endpoint(
        name: &str,
        endpoint: &str,
        filing_type: &str,
        count: u32,
        scraping: &ScrapingCfg,
    ) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Http {
                endpoint: endpoint.to_string(),
                filing_type: filing_type.to_string(),
                count,
                client: http_client(scraping),
            },
        }
    }

    pub fn from_fixture(name: &str, xml: &str) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    fn documents_from_str(&self, xml: &str) -> Result<Vec<RawDocument>, FetchError> {
        let now = Utc::now();
        let docs = parse_feed(xml)?
            .into_iter()
            .map(|entry| {
                let title = entry.title.as_deref().map(normalize_text).unwrap_or_default();
                let content = entry.summary.as_deref().map(normalize_text).unwrap_or_default();
                let (published_at, published_estimated) = match entry.timestamp() {
                    Some(ts) => (ts, false),
                    None => (now, true),
                };
                RawDocument {
                    body: format!("{content} {title}"),
                    summary: truncate_summary(&content, FILING_SUMMARY_MAX),
                    title,
                    url: entry.link.unwrap_or_default(),
                    published_at,
                    published_estimated,
                    kind: ContentType::Filing,
                    authors: Vec::new(),
                }
            })
            .collect();
        Ok(docs)
    }
}

#[async_trait]
impl SourceAdapter for FilingAdapter {
    async fn fetch(&self, _lookback_days: u32) -> Result<Vec<RawDocument>, FetchError> {
        match &self.mode {
            Mode::Fixture(xml) => self.documents_from_str(xml),
            Mode::Http {
                endpoint,
                filing_type,
                count,
                client,
            } => {
                let count = count.to_string();
                let req = client.get(endpoint.as_str()).query(&[
                    ("action", "getcompany"),
                    ("type", filing_type.as_str()),
                    ("count", count.as_str()),
                    ("output", "atom"),
                ]);
                let body = send_for_text(req).await?;
                self.documents_from_str(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ContentType {
        ContentType::Filing
    }
}
