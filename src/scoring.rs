// src/scoring.rs
//! Signal score from a matched-phrase set.
//!
//! Count mode:    score = |matched|
//! Weighted mode: score = Σ weight(phrase) × credibility(source)
//!
//! Both are non-negative and non-decreasing as distinct phrases are added.

use std::collections::HashMap;

use crate::config::{ScoreMode, ScoringCfg};
use crate::source_weights::{sanitize, SourceCredibility};

#[derive(Debug, Clone)]
pub struct SignalScorer {
    mode: ScoreMode,
    default_weight: f64,
    phrase_weights: HashMap<String, f64>,
    credibility: SourceCredibility,
}

impl SignalScorer {
    /// Unweighted scorer: one point per distinct phrase.
    pub fn count() -> Self {
        Self {
            mode: ScoreMode::Count,
            default_weight: 1.0,
            phrase_weights: HashMap::new(),
            credibility: SourceCredibility::neutral(),
        }
    }

    pub fn from_config(cfg: &ScoringCfg) -> Self {
        // A phrase listed under several categories takes the heaviest one.
        let mut phrase_weights: HashMap<String, f64> = HashMap::new();
        for cat in cfg.categories.values() {
            let w = sanitize(cat.weight);
            for p in &cat.phrases {
                let e = phrase_weights.entry(p.trim().to_lowercase()).or_insert(w);
                *e = e.max(w);
            }
        }
        Self {
            mode: cfg.mode,
            default_weight: sanitize(cfg.default_weight),
            phrase_weights,
            credibility: SourceCredibility::new(&cfg.credibility),
        }
    }

    /// `matched` is expected to hold distinct phrases (as `KeywordMatcher::find` returns).
    pub fn score(&self, matched: &[String], source: &str) -> f64 {
        match self.mode {
            ScoreMode::Count => matched.len() as f64,
            ScoreMode::Weighted => {
                let sum: f64 = matched
                    .iter()
                    .map(|p| {
                        self.phrase_weights
                            .get(p.as_str())
                            .copied()
                            .unwrap_or(self.default_weight)
                    })
                    .sum();
                sum * self.credibility.multiplier_for(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryCfg, CredibilityCfg};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn weighted() -> SignalScorer {
        let mut categories = HashMap::new();
        categories.insert(
            "funding".to_string(),
            CategoryCfg {
                weight: 3.0,
                phrases: s(&["seed round", "series a"]),
            },
        );
        categories.insert(
            "launch".to_string(),
            CategoryCfg {
                weight: 2.0,
                phrases: s(&["launch", "seed round"]),
            },
        );
        SignalScorer::from_config(&ScoringCfg {
            mode: ScoreMode::Weighted,
            default_weight: 1.0,
            categories,
            credibility: CredibilityCfg {
                default: 1.0,
                sources: [("TechCrunch".to_string(), 2.0)].into_iter().collect(),
            },
        })
    }

    #[test]
    fn count_mode_is_cardinality() {
        let sc = SignalScorer::count();
        assert_eq!(sc.score(&s(&["seed round"]), "X"), 1.0);
        assert_eq!(sc.score(&s(&["seed round", "launch"]), "X"), 2.0);
        assert_eq!(sc.score(&[], "X"), 0.0);
    }

    #[test]
    fn count_mode_is_monotonic_in_distinct_phrases() {
        let sc = SignalScorer::count();
        let all = s(&["a", "b", "c", "d"]);
        let mut prev = 0.0;
        for n in 0..=all.len() {
            let cur = sc.score(&all[..n], "X");
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn weighted_mode_applies_categories_and_credibility() {
        let sc = weighted();
        // seed round takes max(3, 2); unknown phrase falls back to default 1
        assert_eq!(sc.score(&s(&["seed round", "ipo"]), "Some Blog"), 4.0);
        assert_eq!(sc.score(&s(&["seed round", "ipo"]), "techcrunch"), 8.0);
        assert_eq!(sc.score(&s(&["launch"]), "TechCrunch"), 4.0);
    }

    #[test]
    fn non_finite_weights_score_as_zero() {
        let mut categories = HashMap::new();
        categories.insert(
            "funding".to_string(),
            CategoryCfg {
                weight: f64::INFINITY,
                phrases: s(&["seed round"]),
            },
        );
        let sc = SignalScorer::from_config(&ScoringCfg {
            mode: ScoreMode::Weighted,
            default_weight: f64::NAN,
            categories,
            credibility: CredibilityCfg {
                default: 0.0,
                sources: HashMap::new(),
            },
        });
        let score = sc.score(&s(&["seed round", "ipo"]), "Anywhere");
        assert!(score.is_finite());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn weighted_mode_never_negative() {
        let mut cfg = ScoringCfg::default();
        cfg.mode = ScoreMode::Weighted;
        cfg.default_weight = -5.0;
        let sc = SignalScorer::from_config(&cfg);
        assert!(sc.score(&s(&["x", "y"]), "z") >= 0.0);
    }
}
