// tests/providers_http.rs
//
// Adapters against a local mock HTTP server: request shape, status handling,
// partial press-page failure.

use std::time::Duration;

use startup_signal::config::ScrapingCfg;
use startup_signal::ingest::providers::{
    FeedAdapter, FilingAdapter, FullArticleAdapter, PressPageAdapter,
};
use startup_signal::ingest::fetch_with_timeout;
use startup_signal::ingest::types::{FetchError, SourceAdapter};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS: &str = include_str!("fixtures/startup_rss.xml");
const EDGAR: &str = include_str!("fixtures/edgar_form_d.xml");
const PRESS: &str = include_str!("fixtures/university_news.html");
const ARTICLE: &str = include_str!("fixtures/article.html");

const WIDE: u32 = 36_500;

fn scraping() -> ScrapingCfg {
    ScrapingCfg {
        user_agent: "SignalTest/0.1".to_string(),
        request_timeout_secs: 1,
        ..ScrapingCfg::default()
    }
}

#[tokio::test]
async fn feed_is_fetched_with_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .and(header("user-agent", "SignalTest/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/rss", server.uri());
    let docs = FeedAdapter::from_url("Startup Wire", &url, &scraping())
        .fetch(WIDE)
        .await
        .expect("feed over http");
    assert_eq!(docs.len(), 4);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = FeedAdapter::from_url("Down", &server.uri(), &scraping())
        .fetch(WIDE)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status(503)), "got {err:?}");
}

#[tokio::test]
async fn malformed_feed_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<rss version="2.0"></rss>"#))
        .mount(&server)
        .await;

    let err = FeedAdapter::from_url("Broken", &server.uri(), &scraping())
        .fetch(WIDE)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_response_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RSS)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = FeedAdapter::from_url("Slow", &server.uri(), &scraping())
        .fetch(WIDE)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn filing_query_carries_form_type_and_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/browse-edgar"))
        .and(query_param("action", "getcompany"))
        .and(query_param("type", "D"))
        .and(query_param("count", "40"))
        .and(query_param("output", "atom"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EDGAR))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/cgi-bin/browse-edgar", server.uri());
    let docs = FilingAdapter::from_endpoint("SEC EDGAR", &endpoint, "D", 40, &scraping())
        .fetch(WIDE)
        .await
        .expect("filing over http");
    assert_eq!(docs.len(), 2);
}

#[tokio::test]
async fn one_failing_press_page_does_not_sink_the_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mit"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stanford"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRESS))
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/mit", server.uri()),
        format!("{}/stanford", server.uri()),
    ];
    let docs = PressPageAdapter::from_urls("University News", urls, &scraping())
        .fetch(WIDE)
        .await
        .expect("partial failure is tolerated");
    assert_eq!(docs.len(), 3);
    assert!(docs.iter().all(|d| d.url.ends_with("/stanford")));
}

#[tokio::test]
async fn slow_press_pages_keep_blocks_from_fast_ones_within_source_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRESS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PRESS)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/b", server.uri()),
        format!("{}/b", server.uri()),
        format!("{}/a", server.uri()),
    ];
    let adapter = PressPageAdapter::from_urls("University News", urls, &scraping());
    let docs = fetch_with_timeout(&adapter, WIDE, Duration::from_millis(1500))
        .await
        .expect("fast page survives slow siblings");
    assert_eq!(docs.len(), 3);
    assert!(docs.iter().all(|d| d.url.ends_with("/a")));
}

#[tokio::test]
async fn all_press_pages_failing_is_a_source_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())];
    let res = PressPageAdapter::from_urls("University News", urls, &scraping())
        .fetch(WIDE)
        .await;
    assert!(matches!(res, Err(FetchError::Status(404))));
}

#[tokio::test]
async fn article_is_fetched_and_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nimbus"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;

    let url = format!("{}/nimbus", server.uri());
    let adapter = FullArticleAdapter::from_url("Full Article", &url, &scraping());
    assert_eq!(adapter.url(), url);
    let docs = adapter.fetch(WIDE).await.expect("article over http");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].url, url);
    assert!(docs[0].title.contains("seed round"));
}
