// src/classify.rs
//! Ordered first-match labelling for region and sector tags.
//!
//! Rules are scanned in declaration order and the first rule with any phrase
//! present as a plain substring wins. Unlike the keyword gate there is no
//! word-boundary check here, so "ai" does hit "said".

use crate::config::LabelRule;

pub const DEFAULT_LABEL: &str = "Other";

#[derive(Debug, Clone)]
pub struct RuleClassifier {
    rules: Vec<LabelRule>,
}

impl RuleClassifier {
    pub fn new(rules: Vec<LabelRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| LabelRule {
                label: r.label,
                phrases: r
                    .phrases
                    .into_iter()
                    .map(|p| p.to_lowercase())
                    .filter(|p| !p.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> &str {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.phrases.iter().any(|p| lower.contains(p.as_str())))
            .map(|r| r.label.as_str())
            .unwrap_or(DEFAULT_LABEL)
    }
}
