// src/ingest/providers/mod.rs
pub mod feed;
pub mod filing;
pub mod full_article;
pub mod press_page;

use crate::config::{SignalConfig, SourceKind};
use crate::ingest::types::SourceAdapter;

pub use feed::FeedAdapter;
pub use filing::FilingAdapter;
pub use full_article::FullArticleAdapter;
pub use press_page::PressPageAdapter;

const DEFAULT_FILING_TYPE: &str = "D";
const DEFAULT_FILING_COUNT: u32 = 100;

/// One adapter per configured source, in configuration order.
pub fn build_adapters(cfg: &SignalConfig) -> Vec<Box<dyn SourceAdapter>> {
    let scraping = &cfg.scraping;
    cfg.sources
        .iter()
        .filter_map(|src| {
            let endpoints = src.endpoints();
            let first = endpoints.first()?.clone();
            let adapter: Box<dyn SourceAdapter> = match src.kind {
                SourceKind::Feed => Box::new(FeedAdapter::from_url(&src.name, &first, scraping)),
                SourceKind::Filing => Box::new(FilingAdapter::from_endpoint(
                    &src.name,
                    &first,
                    src.filing_type.as_deref().unwrap_or(DEFAULT_FILING_TYPE),
                    src.count.unwrap_or(DEFAULT_FILING_COUNT),
                    scraping,
                )),
                SourceKind::PressPage => {
                    Box::new(PressPageAdapter::from_urls(&src.name, endpoints, scraping))
                }
                SourceKind::Article => {
                    Box::new(FullArticleAdapter::from_url(&src.name, &first, scraping))
                }
            };
            Some(adapter)
        })
        .collect()
}
