//! # Source Credibility
//!
//! Per-source multipliers applied by the weighted scoring mode
//! (e.g. "TechCrunch Startups" → 2.0, "Mashable Tech" → 1.0).
//!
//! - Case-insensitive lookup with normalization of punctuation and dashes.
//! - Fallback order: exact match → default.
//! - Negative or non-finite multipliers are clamped to 0.0.

use std::collections::HashMap;

use crate::config::CredibilityCfg;

#[derive(Debug, Clone)]
pub struct SourceCredibility {
    default: f64,
    weights: HashMap<String, f64>,
}

impl SourceCredibility {
    pub fn new(cfg: &CredibilityCfg) -> Self {
        let weights = cfg
            .sources
            .iter()
            .map(|(k, v)| (normalize(k), sanitize(*v)))
            .collect();
        Self {
            default: sanitize(cfg.default),
            weights,
        }
    }

    /// Everything weighs 1.0.
    pub fn neutral() -> Self {
        Self::new(&CredibilityCfg::default())
    }

    pub fn multiplier_for(&self, source: &str) -> f64 {
        self.weights
            .get(&normalize(source))
            .copied()
            .unwrap_or(self.default)
    }
}

/// Lowercase, replace dashes/underscores/slashes/dots with spaces, collapse spaces.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for ch in ['—', '–', '-', '_', '/', '\\', '.', ','] {
        out = out.replace(ch, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Non-finite or negative weights become 0.0.
pub(crate) fn sanitize(x: f64) -> f64 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}
