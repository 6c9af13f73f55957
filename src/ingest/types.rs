// src/ingest/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structural category of the originating source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "RSS Feed")]
    Feed,
    #[serde(rename = "SEC Filing")]
    Filing,
    #[serde(rename = "Press Release")]
    PressPage,
    #[serde(rename = "Full Article")]
    FullArticle,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Feed => "RSS Feed",
            ContentType::Filing => "SEC Filing",
            ContentType::PressPage => "Press Release",
            ContentType::FullArticle => "Full Article",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A document as fetched by one adapter call; consumed once by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub title: String,
    /// Text scanned by the keyword gate.
    pub body: String,
    /// Text shown on the resulting record.
    pub summary: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    /// True when `published_at` is the acquisition time, not source metadata.
    pub published_estimated: bool,
    pub kind: ContentType,
    pub authors: Vec<String>,
}

impl RawDocument {
    /// Window check; estimated timestamps are always in window.
    pub fn in_window(&self, cutoff: DateTime<Utc>) -> bool {
        self.published_estimated || self.published_at >= cutoff
    }
}

/// Recoverable acquisition failures. None of these abort an aggregation pass.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("malformed content: {0}")]
    Parse(String),

    #[error("source exceeded {0}s budget")]
    Timeout(u64),
}

#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch(&self, lookback_days: u32) -> Result<Vec<RawDocument>, FetchError>;

    /// Configured source name, e.g. "TechCrunch" or "SEC EDGAR".
    fn name(&self) -> &str;

    fn kind(&self) -> ContentType;
}
