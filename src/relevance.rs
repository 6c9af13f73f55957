// src/relevance.rs
//! Relevance gate: exact-phrase vocabulary matched at word boundaries.

use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

// Dev logging gate: STARTUP_SIGNAL_DEV_LOG=1 AND a debug build
pub(crate) fn dev_logging_enabled() -> bool {
    cfg!(debug_assertions) && std::env::var("STARTUP_SIGNAL_DEV_LOG").ok().as_deref() == Some("1")
}

/// Short stable hex digest, used for record ids and anonymized dev logs.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug)]
struct CompiledPhrase {
    phrase: String,
    re: Regex,
}

/// Holds the ordered vocabulary with one compiled boundary regex per phrase.
#[derive(Debug)]
pub struct KeywordMatcher {
    phrases: Vec<CompiledPhrase>,
}

impl KeywordMatcher {
    /// Blank and duplicate phrases are dropped; first occurrence keeps its position.
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        let mut seen = HashSet::new();
        let phrases = vocabulary
            .iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .filter_map(|phrase| {
                let pattern = format!(r"\b{}\b", regex::escape(&phrase));
                match Regex::new(&pattern) {
                    Ok(re) => Some(CompiledPhrase { phrase, re }),
                    Err(e) => {
                        tracing::warn!(%phrase, error = %e, "skipping uncompilable phrase");
                        None
                    }
                }
            })
            .collect();
        Self { phrases }
    }

    /// Distinct vocabulary phrases present in `text`, in vocabulary order.
    pub fn find(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let found: Vec<String> = self
            .phrases
            .iter()
            .filter(|p| p.re.is_match(&lower))
            .map(|p| p.phrase.clone())
            .collect();

        if dev_logging_enabled() {
            debug!(target: "relevance", id = %anon_hash(text), matched = ?found, "keyword scan");
        }
        found
    }
}
