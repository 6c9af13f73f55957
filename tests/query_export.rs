// tests/query_export.rs
//
// Read-side contract over an aggregated fixture collection: filters, digest,
// JSON/CSV export.

use startup_signal::aggregate::Aggregator;
use startup_signal::config::SignalConfig;
use startup_signal::export::{to_csv, to_json, ExportFormat};
use startup_signal::ingest::providers::{FeedAdapter, FilingAdapter};
use startup_signal::ingest::types::SourceAdapter;
use startup_signal::{SignalDigest, SignalFilter, SignalRecord};

const CONFIG: &str = include_str!("fixtures/test_signal.toml");
const RSS: &str = include_str!("fixtures/startup_rss.xml");
const ATOM: &str = include_str!("fixtures/startup_atom.xml");
const EDGAR: &str = include_str!("fixtures/edgar_form_d.xml");

async fn collection() -> Vec<SignalRecord> {
    let cfg = SignalConfig::from_toml_str(CONFIG).expect("test config");
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(FeedAdapter::from_fixture("Startup Wire", RSS)),
        Box::new(FeedAdapter::from_fixture("Launch Log", ATOM)),
        Box::new(FilingAdapter::from_fixture("SEC EDGAR", EDGAR)),
    ];
    Aggregator::with_adapters(&cfg, adapters).aggregate(36_500).await
}

fn urls(v: &[&SignalRecord]) -> Vec<String> {
    v.iter().map(|r| r.url.clone()).collect()
}

#[tokio::test]
async fn region_and_keyword_filters_commute() {
    let data = collection().await;
    let region = SignalFilter {
        region: Some("Boston".into()),
        ..Default::default()
    };
    let keyword = SignalFilter {
        keyword: Some("launch".into()),
        ..Default::default()
    };

    let a: Vec<SignalRecord> = region.apply(&data).into_iter().cloned().collect();
    let a = urls(&keyword.apply(&a));
    let b: Vec<SignalRecord> = keyword.apply(&data).into_iter().cloned().collect();
    let b = urls(&region.apply(&b));

    assert_eq!(a, b);
    assert_eq!(a, vec!["https://log.test/delta".to_string()]);
}

#[tokio::test]
async fn all_placeholder_returns_everything() {
    let data = collection().await;
    let f = SignalFilter {
        region: Some("All".into()),
        sector: Some("All".into()),
        source: Some("All".into()),
        ..Default::default()
    };
    assert_eq!(f.apply(&data).len(), data.len());
}

#[tokio::test]
async fn source_and_score_filters_are_exact_and_inclusive() {
    let data = collection().await;
    let f = SignalFilter {
        source: Some("Startup Wire".into()),
        min_score: Some(2.0),
        ..Default::default()
    };
    let hits = f.apply(&data);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|r| r.source == "Startup Wire" && r.score >= 2.0));

    let f = SignalFilter {
        source: Some("startup wire".into()),
        ..Default::default()
    };
    assert!(f.apply(&data).is_empty(), "source match is exact");
}

#[tokio::test]
async fn recent_days_filter_drops_fixture_dates() {
    let data = collection().await;
    let f = SignalFilter {
        days: Some(1),
        ..Default::default()
    };
    assert!(f.apply(&data).is_empty());
}

#[tokio::test]
async fn digest_over_filtered_view() {
    let data = collection().await;
    let all = SignalDigest::from_records(&data);
    assert_eq!(all.total, 4);
    assert_eq!(all.top_source.as_deref(), Some("Startup Wire"));
    assert_eq!(all.by_source["SEC EDGAR"], 1);
    assert_eq!(all.by_content_type["SEC Filing"], 1);

    let fintech = SignalFilter {
        sector: Some("Fintech".into()),
        ..Default::default()
    };
    let d = SignalDigest::from_records(fintech.apply(&data));
    assert_eq!(d.total, 1);
    assert_eq!(d.by_region["New York"], 1);
}

#[tokio::test]
async fn json_export_round_trips_records() {
    let data = collection().await;
    let json = to_json(&data).expect("json export");
    let back: Vec<SignalRecord> = serde_json::from_str(&json).expect("parse export");
    assert_eq!(back, data);
}

#[tokio::test]
async fn csv_export_has_one_row_per_record() {
    let data = collection().await;
    let csv_text = to_csv(&data).expect("csv export");

    let mut rdr = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = rdr.headers().expect("header row").clone();
    assert_eq!(&headers[0], "title");
    assert_eq!(&headers[5], "keywords");

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), data.len());
    let acme = rows
        .iter()
        .find(|r| &r[2] == "https://wire.test/acme-seed")
        .expect("acme row");
    assert_eq!(&acme[5], "seed round; stealth");
    assert_eq!(&acme[7], "RSS Feed");
}

#[tokio::test]
async fn format_dispatch_matches_direct_calls() {
    let data = collection().await;
    assert_eq!(
        ExportFormat::Csv.render(&data).unwrap(),
        to_csv(&data).unwrap()
    );
    assert_eq!(
        ExportFormat::Json.render(&data).unwrap(),
        to_json(&data).unwrap()
    );
}
