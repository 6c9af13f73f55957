// src/signal.rs
//! Signal records and the gate → score → classify step that produces them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::RuleClassifier;
use crate::config::SignalConfig;
use crate::ingest::types::{ContentType, RawDocument};
use crate::relevance::{anon_hash, KeywordMatcher};
use crate::scoring::SignalScorer;

/// One keyword-positive document. Immutable once built; `keywords` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub summary: String,
    #[serde(rename = "publish_date")]
    pub published_at: DateTime<Utc>,
    pub keywords: Vec<String>,
    #[serde(rename = "signal_score")]
    pub score: f64,
    pub content_type: ContentType,
    pub region: String,
    pub sector: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

pub struct SignalBuilder {
    matcher: KeywordMatcher,
    scorer: SignalScorer,
    regions: RuleClassifier,
    sectors: RuleClassifier,
}

impl SignalBuilder {
    pub fn new(
        matcher: KeywordMatcher,
        scorer: SignalScorer,
        regions: RuleClassifier,
        sectors: RuleClassifier,
    ) -> Self {
        Self {
            matcher,
            scorer,
            regions,
            sectors,
        }
    }

    pub fn from_config(cfg: &SignalConfig) -> Self {
        Self::new(
            KeywordMatcher::new(cfg.keywords.as_slice()),
            SignalScorer::from_config(&cfg.scoring),
            RuleClassifier::new(cfg.regions.clone()),
            RuleClassifier::new(cfg.sectors.clone()),
        )
    }

    /// `None` when no vocabulary phrase occurs in the document body.
    pub fn build(&self, source: &str, doc: RawDocument) -> Option<SignalRecord> {
        let keywords = self.matcher.find(&doc.body);
        if keywords.is_empty() {
            return None;
        }

        let score = self.scorer.score(&keywords, source);
        let tag_text = format!("{} {}", doc.title, doc.summary);
        let region = self.regions.classify(&tag_text).to_string();
        let sector = self.sectors.classify(&tag_text).to_string();
        let id = anon_hash(&format!("{source}|{}|{}", doc.url, doc.title));

        Some(SignalRecord {
            id,
            title: doc.title,
            source: source.to_string(),
            url: doc.url,
            summary: doc.summary,
            published_at: doc.published_at,
            keywords,
            score,
            content_type: doc.kind,
            region,
            sector,
            authors: doc.authors,
        })
    }
}
