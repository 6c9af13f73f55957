// src/ingest/providers/press_page.rs
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScrapingCfg;
use crate::ingest::types::{ContentType, FetchError, RawDocument, SourceAdapter};
use crate::ingest::{http_client, normalize_text, send_for_text, truncate_summary};

pub const PRESS_SUMMARY_MAX: usize = 300;

/// Institutional news pages; each `<article>` block becomes one document.
pub struct PressPageAdapter {
    name: String,
    mode: Mode,
    max_blocks: usize,
}

enum Mode {
    /// (page url, html) pairs.
    Fixture(Vec<(String, String)>),
    Http {
        urls: Vec<String>,
        client: reqwest::Client,
    },
}

impl PressPageAdapter {
    pub fn from_urls(name: &str, urls: Vec<String>, scraping: &ScrapingCfg) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Http {
                urls,
                client: http_client(scraping),
            },
            max_blocks: scraping.press_max_blocks,
        }
    }

    pub fn from_fixtures(name: &str, pages: Vec<(String, String)>) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Fixture(pages),
            max_blocks: ScrapingCfg::default().press_max_blocks,
        }
    }

    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }
}

/// Extract article-like blocks from one page. Sync on purpose: `Html` is not `Send`.
pub fn extract_blocks(page_url: &str, html: &str, max_blocks: usize) -> Vec<RawDocument> {
    let document = Html::parse_document(html);
    let article_sel = Selector::parse("article").unwrap();
    let h2 = Selector::parse("h2").unwrap();
    let h3 = Selector::parse("h3").unwrap();

    let now = Utc::now();
    document
        .select(&article_sel)
        .take(max_blocks)
        .map(|block| {
            let title = first_text(&block, &h2)
                .or_else(|| first_text(&block, &h3))
                .unwrap_or_else(|| "No title".to_string());
            let text = normalize_text(&block.text().collect::<Vec<_>>().join(" "));
            RawDocument {
                title,
                summary: truncate_summary(&text, PRESS_SUMMARY_MAX),
                body: text,
                url: page_url.to_string(),
                published_at: now,
                published_estimated: true,
                kind: ContentType::PressPage,
                authors: Vec::new(),
            }
        })
        .collect()
}

fn first_text(block: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    block
        .select(sel)
        .next()
        .map(|el| normalize_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl SourceAdapter for PressPageAdapter {
    async fn fetch(&self, _lookback_days: u32) -> Result<Vec<RawDocument>, FetchError> {
        match &self.mode {
            Mode::Fixture(pages) => Ok(pages
                .iter()
                .flat_map(|(url, html)| extract_blocks(url, html, self.max_blocks))
                .collect()),
            Mode::Http { urls, client } => {
                // Concurrent; each page is bounded by the client request timeout.
                let pages = join_all(
                    urls.iter()
                        .map(|url| async move { (url, send_for_text(client.get(url.as_str())).await) }),
                )
                .await;

                let mut out = Vec::new();
                let mut last_err = None;
                let mut pages_ok = 0usize;
                for (url, page) in pages {
                    match page {
                        Ok(html) => {
                            pages_ok += 1;
                            out.extend(extract_blocks(url, &html, self.max_blocks));
                        }
                        Err(e) => {
                            tracing::warn!(source = %self.name, %url, error = %e, "press page fetch failed");
                            last_err = Some(e);
                        }
                    }
                }
                match last_err {
                    // every page failed: surface it as a source error
                    Some(e) if pages_ok == 0 => Err(e),
                    _ => Ok(out),
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ContentType {
        ContentType::PressPage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<article><h3>Sub</h3><h2>Spinout launches</h2><p>Founded by MIT students.</p></article>
<article><h3>Lab news</h3><p>Nothing to see.</p></article>
<article><p>Untitled block</p></article>
</body></html>"#;

    #[test]
    fn headings_prefer_h2_then_h3() {
        let docs = extract_blocks("https://news.test/p", PAGE, 20);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].title, "Spinout launches");
        assert_eq!(docs[1].title, "Lab news");
        assert_eq!(docs[2].title, "No title");
        assert!(docs[0].body.contains("Founded by MIT students."));
        assert!(docs.iter().all(|d| d.published_estimated && d.url == "https://news.test/p"));
    }

    #[test]
    fn block_cap_applies_per_page() {
        assert_eq!(extract_blocks("u", PAGE, 2).len(), 2);
    }
}
