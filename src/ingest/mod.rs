// src/ingest/mod.rs
pub mod feed_xml;
pub mod providers;
pub mod types;

use chrono::{DateTime, TimeDelta, Utc};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;
use std::time::Duration;

use crate::config::ScrapingCfg;
use crate::ingest::types::{FetchError, RawDocument, SourceAdapter};

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "signal_documents_total",
            "Raw documents returned by source adapters."
        );
        describe_counter!(
            "signal_records_total",
            "Signal records materialized after gating."
        );
        describe_counter!(
            "signal_gated_total",
            "Documents dropped for having no keyword match."
        );
        describe_counter!(
            "signal_stale_total",
            "Documents dropped for falling outside the lookback window."
        );
        describe_counter!(
            "signal_source_errors_total",
            "Source fetch/parse errors and timeouts."
        );
        describe_histogram!(
            "signal_source_fetch_ms",
            "Per-source fetch time in milliseconds."
        );
        describe_gauge!(
            "signal_last_run_ts",
            "Unix ts when the aggregation pass last completed."
        );
        describe_gauge!("signal_configured_sources", "Sources in the loaded config.");
        describe_gauge!("signal_vocabulary_size", "Phrases in the relevance vocabulary.");
    });
}

/// Normalize text: decode entities, strip tags, fold quotes, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Cut to `max` chars and append `...` when anything was cut.
pub fn truncate_summary(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Per-adapter HTTP session with the configured user agent and request timeout.
pub fn http_client(cfg: &ScrapingCfg) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(cfg.user_agent.clone())
        .timeout(Duration::from_secs(cfg.request_timeout_secs.max(1)))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "http client builder failed, using defaults");
            reqwest::Client::new()
        })
}

/// Send a prepared request and return the body; any non-2xx status is an error.
pub async fn send_for_text(req: reqwest::RequestBuilder) -> Result<String, FetchError> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(resp.text().await?)
}

/// Oldest publish time inside a `days`-long window ending at `now`.
/// Windows reaching past the representable range start at `MIN_UTC`.
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Run one adapter under a wall-clock budget; overrunning yields `FetchError::Timeout`.
pub async fn fetch_with_timeout(
    adapter: &dyn SourceAdapter,
    lookback_days: u32,
    budget: Duration,
) -> Result<Vec<RawDocument>, FetchError> {
    match tokio::time::timeout(budget, adapter.fetch(lookback_days)).await {
        Ok(res) => res,
        Err(_) => Err(FetchError::Timeout(budget.as_secs())),
    }
}
