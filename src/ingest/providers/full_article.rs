// src/ingest/providers/full_article.rs
//! Single article page: body text, extractive summary, publish date, authors.

use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use std::collections::HashMap;

use crate::config::ScrapingCfg;
use crate::ingest::feed_xml::parse_feed_date;
use crate::ingest::types::{ContentType, FetchError, RawDocument, SourceAdapter};
use crate::ingest::{http_client, normalize_text, send_for_text, truncate_summary};

pub const ARTICLE_SUMMARY_MAX: usize = 500;
pub const SUMMARY_SENTENCES: usize = 5;

pub struct FullArticleAdapter {
    name: String,
    url: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http(reqwest::Client),
}

impl FullArticleAdapter {
    pub fn from_url(name: &str, url: &str, scraping: &ScrapingCfg) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            mode: Mode::Http(http_client(scraping)),
        }
    }

    pub fn from_fixture(name: &str, url: &str, html: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            mode: Mode::Fixture(html.to_string()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SourceAdapter for FullArticleAdapter {
    async fn fetch(&self, _lookback_days: u32) -> Result<Vec<RawDocument>, FetchError> {
        let html = match &self.mode {
            Mode::Fixture(html) => html.clone(),
            Mode::Http(client) => send_for_text(client.get(self.url.as_str())).await?,
        };
        Ok(vec![extract_article(&self.url, &html)])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ContentType {
        ContentType::FullArticle
    }
}

/// Parse an article page into one document.
pub fn extract_article(url: &str, html: &str) -> RawDocument {
    let doc = Html::parse_document(html);

    let title = meta_content(&doc, r#"meta[property="og:title"]"#)
        .or_else(|| first_text(&doc, "title"))
        .or_else(|| first_text(&doc, "h1"))
        .unwrap_or_default();

    let mut paragraphs = texts(&doc, "article p");
    if paragraphs.is_empty() {
        paragraphs = texts(&doc, "p");
    }
    let body = paragraphs.join(" ");

    let published = [
        r#"meta[property="article:published_time"]"#,
        r#"meta[name="pubdate"]"#,
        r#"meta[name="publishdate"]"#,
        r#"meta[itemprop="datePublished"]"#,
    ]
    .iter()
    .filter_map(|sel| meta_content(&doc, sel))
    .chain(attr_values(&doc, "time[datetime]", "datetime"))
    .find_map(|raw| parse_feed_date(&raw));

    let summary = truncate_summary(&summarize(&title, &body, SUMMARY_SENTENCES), ARTICLE_SUMMARY_MAX);

    RawDocument {
        title,
        summary,
        body,
        url: url.to_string(),
        published_at: published.unwrap_or_else(Utc::now),
        published_estimated: published.is_none(),
        kind: ContentType::FullArticle,
        authors: authors(&doc),
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn meta_content(doc: &Html, css: &str) -> Option<String> {
    attr_values(doc, css, "content").into_iter().next()
}

fn attr_values(doc: &Html, css: &str, attr: &str) -> Vec<String> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    doc.select(&sel)
        .filter_map(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn texts(doc: &Html, css: &str) -> Vec<String> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|el| normalize_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
        .collect()
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    texts(doc, css).into_iter().next()
}

fn authors(doc: &Html) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let candidates = attr_values(doc, r#"meta[name="author"]"#, "content")
        .into_iter()
        .chain(texts(doc, r#"[rel="author"]"#));
    for raw in candidates {
        for name in raw.split([',', '&']).flat_map(|s| s.split(" and ")) {
            let name = name.trim().trim_start_matches("By ").trim();
            if !name.is_empty() && !out.iter().any(|a| a.eq_ignore_ascii_case(name)) {
                out.push(name.to_string());
            }
        }
    }
    out
}

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "his", "its", "it's", "that", "this", "with", "from",
    "they", "will", "would", "there", "their", "what", "about", "which", "when", "were", "been",
    "into", "than", "then", "them", "these", "those", "also", "said", "says", "more", "other",
];

fn content_words(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(&w.as_str()))
}

/// Split on `.`, `!`, `?` followed by whitespace.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;
    for (i, c) in text.char_indices() {
        if prev_terminal && c.is_whitespace() {
            let s = text[start..i].trim();
            if !s.is_empty() {
                out.push(s);
            }
            start = i;
        }
        prev_terminal = matches!(c, '.' | '!' | '?');
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Extractive summary: the `n` sentences with the highest average content-word
/// frequency (title words count double), emitted in document order.
pub fn summarize(title: &str, text: &str, n: usize) -> String {
    let sents = sentences(text);
    if sents.len() <= n {
        return sents.join(" ");
    }

    let mut freq: HashMap<String, f64> = HashMap::new();
    for w in content_words(text) {
        *freq.entry(w).or_insert(0.0) += 1.0;
    }
    for w in content_words(title) {
        *freq.entry(w).or_insert(0.0) += 1.0;
    }

    let mut ranked: Vec<(usize, f64)> = sents
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let words: Vec<String> = content_words(s).collect();
            let score = if words.is_empty() {
                0.0
            } else {
                words.iter().map(|w| freq.get(w).copied().unwrap_or(0.0)).sum::<f64>()
                    / words.len() as f64
            };
            (i, score)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut keep: Vec<usize> = ranked.into_iter().take(n).map(|(i, _)| i).collect();
    keep.sort_unstable();
    keep.into_iter().map(|i| sents[i]).collect::<Vec<_>>().join(" ")
}
