// src/aggregate.rs
//! One aggregation pass over every configured source.
//!
//! Sources run concurrently, each under its own time budget. A failing or slow
//! source contributes nothing and is logged; the pass itself never fails.
//! Output order: score desc, then publish time desc.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::{counter, gauge, histogram};
use serde::Serialize;

use crate::config::{ScrapingCfg, SignalConfig};
use crate::ingest::providers::{build_adapters, FullArticleAdapter};
use crate::ingest::types::SourceAdapter;
use crate::ingest::{ensure_metrics_described, fetch_with_timeout, window_start};
use crate::signal::{SignalBuilder, SignalRecord};

/// Source name given to on-demand article records.
pub const ARTICLE_SOURCE: &str = "Full Article";

/// Result of the latest pass, as served to readers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub records: Vec<SignalRecord>,
    pub generated_at: Option<DateTime<Utc>>,
    pub lookback_days: u32,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            generated_at: None,
            lookback_days: 0,
        }
    }
}

pub struct Aggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    builder: SignalBuilder,
    source_timeout: Duration,
    scraping: ScrapingCfg,
}

impl Aggregator {
    pub fn from_config(cfg: &SignalConfig) -> Self {
        Self::with_adapters(cfg, build_adapters(cfg))
    }

    /// Custom adapter set with the vocabulary, rules and budgets of `cfg`.
    pub fn with_adapters(cfg: &SignalConfig, adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self {
            adapters,
            builder: SignalBuilder::from_config(cfg),
            source_timeout: Duration::from_secs(cfg.scraping.source_timeout_secs.max(1)),
            scraping: cfg.scraping.clone(),
        }
    }

    pub fn with_source_timeout(mut self, budget: Duration) -> Self {
        self.source_timeout = budget;
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub async fn aggregate(&self, lookback_days: u32) -> Vec<SignalRecord> {
        ensure_metrics_described();
        let cutoff = window_start(Utc::now(), lookback_days);

        let passes = self
            .adapters
            .iter()
            .map(|a| self.run_source(a.as_ref(), lookback_days, cutoff));
        let mut records: Vec<SignalRecord> = join_all(passes).await.into_iter().flatten().collect();

        sort_signals(&mut records);
        gauge!("signal_last_run_ts").set(Utc::now().timestamp() as f64);
        tracing::info!(
            target: "aggregate",
            sources = self.adapters.len(),
            signals = records.len(),
            lookback_days,
            "aggregation pass finished"
        );
        records
    }

    /// Aggregate and wrap the result with its generation time.
    pub async fn snapshot(&self, lookback_days: u32) -> Snapshot {
        let records = self.aggregate(lookback_days).await;
        Snapshot {
            records,
            generated_at: Some(Utc::now()),
            lookback_days,
        }
    }

    async fn run_source(
        &self,
        adapter: &dyn SourceAdapter,
        lookback_days: u32,
        cutoff: DateTime<Utc>,
    ) -> Vec<SignalRecord> {
        let started = Instant::now();
        let fetched = fetch_with_timeout(adapter, lookback_days, self.source_timeout).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!("signal_source_fetch_ms").record(elapsed_ms);

        let docs = match fetched {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source = adapter.name(),
                    kind = %adapter.kind(),
                    "source failed, skipping"
                );
                counter!("signal_source_errors_total").increment(1);
                return Vec::new();
            }
        };

        let documents = docs.len();
        let mut stale = 0u64;
        let mut gated = 0u64;
        let mut out = Vec::new();
        for doc in docs {
            if !doc.in_window(cutoff) {
                stale += 1;
                continue;
            }
            match self.builder.build(adapter.name(), doc) {
                Some(rec) => out.push(rec),
                None => gated += 1,
            }
        }

        counter!("signal_documents_total").increment(documents as u64);
        counter!("signal_stale_total").increment(stale);
        counter!("signal_gated_total").increment(gated);
        counter!("signal_records_total").increment(out.len() as u64);
        tracing::info!(
            source = adapter.name(),
            kind = %adapter.kind(),
            documents,
            signals = out.len(),
            elapsed_ms = elapsed_ms as u64,
            "source done"
        );
        out
    }

    /// Fetch one article page and build a record from it, if it is keyword-positive.
    pub async fn scrape_article(&self, url: &str) -> Option<SignalRecord> {
        let adapter = FullArticleAdapter::from_url(ARTICLE_SOURCE, url, &self.scraping);
        self.build_single(&adapter).await
    }

    /// Single-adapter pass without a window check.
    pub async fn build_single(&self, adapter: &dyn SourceAdapter) -> Option<SignalRecord> {
        match fetch_with_timeout(adapter, 0, self.source_timeout).await {
            Ok(docs) => docs
                .into_iter()
                .find_map(|d| self.builder.build(adapter.name(), d)),
            Err(e) => {
                tracing::warn!(error = %e, source = adapter.name(), "article scrape failed");
                counter!("signal_source_errors_total").increment(1);
                None
            }
        }
    }
}

/// Score desc, then publish time desc. Stable, so equal keys keep source order.
pub fn sort_signals(records: &mut [SignalRecord]) {
    records.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
}
