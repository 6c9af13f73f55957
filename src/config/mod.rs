// src/config/mod.rs
//! Static pipeline configuration: vocabulary, ordered region/sector rule tables,
//! source endpoints, scoring weights and scraping limits.
//!
//! Resolution order for the TOML file:
//! 1) `$STARTUP_SIGNAL_CONFIG` (must exist when set)
//! 2) `config/signal.toml`
//! 3) built-in [`SignalConfig::default_seed`]

mod defaults;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/signal.toml";
pub const ENV_CONFIG_PATH: &str = "STARTUP_SIGNAL_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub regions: Vec<LabelRule>,
    #[serde(default)]
    pub sectors: Vec<LabelRule>,
    #[serde(default)]
    pub sources: Vec<SourceCfg>,
    #[serde(default)]
    pub scoring: ScoringCfg,
    #[serde(default)]
    pub scraping: ScrapingCfg,
}

/// One row of an ordered classification table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LabelRule {
    pub label: String,
    pub phrases: Vec<String>,
}

impl LabelRule {
    pub fn new(label: &str, phrases: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Feed,
    Filing,
    PressPage,
    Article,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceCfg {
    pub name: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub url: Option<String>,
    /// Press pages fan out over several institution URLs.
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub filing_type: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl SourceCfg {
    pub fn feed(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: SourceKind::Feed,
            url: Some(url.to_string()),
            urls: Vec::new(),
            filing_type: None,
            count: None,
        }
    }

    /// All endpoints declared for this source, `url` first.
    pub fn endpoints(&self) -> Vec<String> {
        self.url
            .iter()
            .chain(self.urls.iter())
            .map(|u| u.trim().to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// One point per distinct matched phrase.
    #[default]
    Count,
    /// Sum of category weights times source credibility.
    Weighted,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCfg {
    pub weight: f64,
    #[serde(default)]
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredibilityCfg {
    #[serde(default = "default_credibility")]
    pub default: f64,
    #[serde(default)]
    pub sources: HashMap<String, f64>,
}

fn default_credibility() -> f64 {
    1.0
}

impl Default for CredibilityCfg {
    fn default() -> Self {
        Self {
            default: default_credibility(),
            sources: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringCfg {
    #[serde(default)]
    pub mode: ScoreMode,
    /// Weight of a matched phrase that belongs to no category.
    #[serde(default = "default_phrase_weight")]
    pub default_weight: f64,
    #[serde(default)]
    pub categories: HashMap<String, CategoryCfg>,
    #[serde(default)]
    pub credibility: CredibilityCfg,
}

fn default_phrase_weight() -> f64 {
    1.0
}

impl Default for ScoringCfg {
    fn default() -> Self {
        Self {
            mode: ScoreMode::Count,
            default_weight: default_phrase_weight(),
            categories: HashMap::new(),
            credibility: CredibilityCfg::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapingCfg {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries_per_source: usize,
    #[serde(default = "default_press_blocks")]
    pub press_max_blocks: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_request_timeout() -> u64 {
    30
}
fn default_source_timeout() -> u64 {
    60
}
fn default_max_entries() -> usize {
    50
}
fn default_press_blocks() -> usize {
    20
}
fn default_user_agent() -> String {
    "StartupSignal/1.0 (Educational Research Tool)".to_string()
}

impl Default for ScrapingCfg {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            source_timeout_secs: default_source_timeout(),
            max_entries_per_source: default_max_entries(),
            press_max_blocks: default_press_blocks(),
            user_agent: default_user_agent(),
        }
    }
}

impl SignalConfig {
    /// Resolve the config file via env var + fallbacks (see module docs).
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load_from(&default_path);
        }
        tracing::info!("no signal config file found, using built-in defaults");
        Ok(Self::default_seed())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading signal config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing signal config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SignalConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            bail!("keyword vocabulary is empty");
        }
        for src in &self.sources {
            let endpoints = src.endpoints();
            if endpoints.is_empty() || endpoints.iter().any(|e| e.is_empty()) {
                bail!("source `{}` has no usable endpoint", src.name);
            }
        }
        Ok(())
    }
}
