// src/config/defaults.rs
//! Built-in tables used when no config file is present.

use std::collections::HashMap;

use super::{
    CategoryCfg, CredibilityCfg, LabelRule, ScoreMode, ScoringCfg, ScrapingCfg, SignalConfig,
    SourceCfg, SourceKind,
};

const KEYWORDS: &[&str] = &[
    "seed round",
    "series a",
    "series b",
    "funding round",
    "venture capital",
    "stealth startup",
    "stealth mode",
    "new startup",
    "launch",
    "founded",
    "pre-seed",
    "angel investment",
    "incubator",
    "accelerator",
    "pivot",
    "startup announces",
    "emerging company",
    "tech startup",
    "fintech startup",
    "biotech startup",
    "ai startup",
    "machine learning startup",
    "blockchain startup",
    "cryptocurrency startup",
    "healthtech startup",
    "edtech startup",
    "proptech startup",
    "acquired by",
    "acquisition",
    "merger",
    "ipo",
    "going public",
    "spac",
    "unicorn",
    "decacorn",
    "valuation",
    "pre-revenue",
    "mvp",
    "beta launch",
    "product launch",
    "soft launch",
    "stealth",
    "coming out of stealth",
    // extended vocabulary
    "pre-ipo",
    "late stage",
    "growth equity",
    "private equity",
    "venture debt",
    "convertible note",
    "safe note",
    "revenue share",
    "bootstrapped",
    "profitable",
    "break-even",
    "cash flow positive",
    "market leader",
    "disrupting",
    "innovative",
    "cutting edge",
    "patent pending",
    "intellectual property",
    "trade secret",
    "b2b",
    "b2c",
    "b2b2c",
    "saas",
    "paas",
    "iaas",
    "freemium",
    "subscription",
    "recurring revenue",
    "arr",
    "mrr",
    "customer acquisition",
    "product-market fit",
    "scaling",
    "go-to-market",
    "gtm",
    "channel partner",
    "strategic partnership",
];

fn region_rules() -> Vec<LabelRule> {
    vec![
        LabelRule::new(
            "Silicon Valley",
            &["silicon valley", "san francisco", "bay area", "palo alto", "mountain view", "menlo park"],
        ),
        LabelRule::new("New York", &["new york", "nyc", "manhattan", "brooklyn", "queens"]),
        LabelRule::new("Boston", &["boston", "cambridge", "mit", "harvard", "massachusetts"]),
        LabelRule::new("London", &["london", "uk", "england", "united kingdom"]),
        LabelRule::new("Tel Aviv", &["tel aviv", "israel", "jerusalem"]),
        LabelRule::new("Berlin", &["berlin", "germany", "munich"]),
        LabelRule::new("Paris", &["paris", "france"]),
        LabelRule::new("Toronto", &["toronto", "canada", "vancouver"]),
        LabelRule::new("Singapore", &["singapore", "asia pacific"]),
        LabelRule::new("Austin", &["austin", "texas", "dallas"]),
        LabelRule::new("Seattle", &["seattle", "washington", "redmond"]),
        LabelRule::new("Los Angeles", &["los angeles", "la", "california", "santa monica"]),
        LabelRule::new("Chicago", &["chicago", "illinois"]),
        LabelRule::new("Miami", &["miami", "florida"]),
        LabelRule::new("Amsterdam", &["amsterdam", "netherlands", "holland"]),
        LabelRule::new("Stockholm", &["stockholm", "sweden", "nordic"]),
        LabelRule::new("Bangalore", &["bangalore", "india", "mumbai", "delhi"]),
        LabelRule::new("Sydney", &["sydney", "australia", "melbourne"]),
    ]
}

fn sector_rules() -> Vec<LabelRule> {
    vec![
        LabelRule::new(
            "AI/ML",
            &[
                "ai",
                "artificial intelligence",
                "machine learning",
                "ml",
                "deep learning",
                "neural network",
                "nlp",
                "computer vision",
            ],
        ),
        LabelRule::new(
            "FinTech",
            &[
                "fintech",
                "financial",
                "banking",
                "payment",
                "cryptocurrency",
                "blockchain",
                "defi",
                "regtech",
                "insurtech",
            ],
        ),
        LabelRule::new(
            "HealthTech",
            &[
                "health",
                "medical",
                "biotech",
                "pharma",
                "telemedicine",
                "digital health",
                "medtech",
                "therapeutics",
            ],
        ),
        LabelRule::new(
            "EdTech",
            &["education", "edtech", "learning", "e-learning", "online education", "mooc", "lms"],
        ),
        LabelRule::new(
            "E-commerce",
            &["e-commerce", "ecommerce", "online retail", "marketplace", "dropshipping", "fulfillment"],
        ),
        LabelRule::new(
            "SaaS",
            &["saas", "software", "platform", "cloud", "enterprise software", "productivity"],
        ),
        LabelRule::new(
            "Hardware",
            &["hardware", "iot", "robotics", "semiconductor", "electronics", "manufacturing"],
        ),
        LabelRule::new(
            "Gaming",
            &["gaming", "esports", "mobile games", "console", "vr", "ar", "virtual reality"],
        ),
        LabelRule::new(
            "Media",
            &["media", "content", "streaming", "entertainment", "publishing", "social media"],
        ),
        LabelRule::new(
            "Transportation",
            &["transportation", "mobility", "autonomous", "electric vehicle", "logistics", "delivery"],
        ),
        LabelRule::new(
            "Energy",
            &["energy", "cleantech", "renewable", "solar", "wind", "battery", "sustainable"],
        ),
        LabelRule::new(
            "Real Estate",
            &["proptech", "real estate", "property", "construction", "smart building"],
        ),
        LabelRule::new(
            "Agriculture",
            &["agtech", "agriculture", "farming", "food tech", "precision agriculture"],
        ),
        LabelRule::new("Space", &["space", "satellite", "aerospace", "space tech", "orbital"]),
        LabelRule::new(
            "Cybersecurity",
            &["cybersecurity", "security", "privacy", "encryption", "firewall", "threat detection"],
        ),
        LabelRule::new(
            "Developer Tools",
            &["developer tools", "devtools", "api", "infrastructure", "devops", "cicd"],
        ),
    ]
}

const FEEDS: &[(&str, &str)] = &[
    ("TechCrunch", "https://techcrunch.com/feed/"),
    ("VentureBeat", "https://venturebeat.com/feed/"),
    ("The Verge", "https://www.theverge.com/rss/index.xml"),
    ("Ars Technica", "https://feeds.arstechnica.com/arstechnica/index"),
    ("Wired", "https://www.wired.com/feed/rss"),
    ("Engadget", "https://www.engadget.com/rss.xml"),
    ("TechRadar", "https://www.techradar.com/rss"),
    ("ZDNet", "https://www.zdnet.com/news/rss.xml"),
    ("Mashable Tech", "https://mashable.com/feeds/rss/tech"),
    ("Entrepreneur", "https://www.entrepreneur.com/latest.rss"),
    ("Fast Company", "https://www.fastcompany.com/latest/rss"),
    ("Business Insider Tech", "https://www.businessinsider.com/rss"),
    ("Forbes Technology", "https://www.forbes.com/innovation/feed2/"),
    ("MIT News", "https://news.mit.edu/rss/feed"),
    ("Stanford News", "https://news.stanford.edu/feed/"),
    ("Hacker News", "https://hnrss.org/newest"),
    ("Y Combinator", "https://www.ycombinator.com/blog/feed"),
    ("AI News", "https://artificialintelligence-news.com/feed/"),
    ("TechCrunch Startups", "https://techcrunch.com/category/startups/feed/"),
];

const PRESS_PAGES: &[&str] = &[
    "https://news.mit.edu/topic/innovation-entrepreneurship",
    "https://news.stanford.edu/topics/business/",
    "https://news.berkeley.edu/topic/business/",
];

const CREDIBILITY: &[(&str, f64)] = &[
    ("TechCrunch", 1.8),
    ("TechCrunch Startups", 2.0),
    ("VentureBeat", 1.6),
    ("Y Combinator", 2.0),
    ("MIT News", 1.7),
    ("Stanford News", 1.7),
    ("Entrepreneur", 1.5),
    ("Fast Company", 1.4),
    ("Business Insider Tech", 1.3),
    ("Forbes Technology", 1.4),
    ("AI News", 1.3),
    ("Hacker News", 1.2),
    ("The Verge", 1.2),
    ("Ars Technica", 1.2),
    ("Wired", 1.1),
    ("Engadget", 1.1),
    ("TechRadar", 1.1),
    ("ZDNet", 1.1),
    ("Mashable Tech", 1.0),
    ("SEC EDGAR", 2.0),
    ("University News", 1.4),
    ("Full Article", 1.1),
];

const FUNDING_PHRASES: &[&str] = &[
    "seed round",
    "series a",
    "series b",
    "funding round",
    "venture capital",
    "pre-seed",
    "angel investment",
    "valuation",
    "growth equity",
    "venture debt",
    "convertible note",
    "safe note",
];

const LAUNCH_PHRASES: &[&str] = &[
    "stealth startup",
    "stealth mode",
    "new startup",
    "launch",
    "founded",
    "startup announces",
    "beta launch",
    "product launch",
    "soft launch",
    "stealth",
    "coming out of stealth",
    "mvp",
];

const BUSINESS_PHRASES: &[&str] = &[
    "acquired by",
    "acquisition",
    "merger",
    "ipo",
    "pre-ipo",
    "going public",
    "spac",
    "unicorn",
    "decacorn",
];

const TECH_PHRASES: &[&str] = &[
    "tech startup",
    "fintech startup",
    "biotech startup",
    "ai startup",
    "machine learning startup",
    "blockchain startup",
    "cryptocurrency startup",
    "healthtech startup",
    "edtech startup",
    "proptech startup",
];

fn categories() -> HashMap<String, CategoryCfg> {
    [
        ("funding", 3.0, FUNDING_PHRASES),
        ("launch", 2.0, LAUNCH_PHRASES),
        ("business", 2.0, BUSINESS_PHRASES),
        ("tech", 1.0, TECH_PHRASES),
    ]
    .into_iter()
    .map(|(name, weight, phrases)| {
        (
            name.to_string(),
            CategoryCfg {
                weight,
                phrases: phrases.iter().map(|p| p.to_string()).collect(),
            },
        )
    })
    .collect()
}

impl SignalConfig {
    /// Built-in configuration mirroring the stock deployment.
    /// Scoring stays in count mode; the weight table is present but opt-in.
    pub fn default_seed() -> Self {
        let mut sources: Vec<SourceCfg> = FEEDS
            .iter()
            .map(|(name, url)| SourceCfg::feed(name, url))
            .collect();

        sources.push(SourceCfg {
            name: "SEC EDGAR".to_string(),
            kind: SourceKind::Filing,
            url: Some("https://www.sec.gov/cgi-bin/browse-edgar".to_string()),
            urls: Vec::new(),
            filing_type: Some("D".to_string()),
            count: Some(100),
        });

        sources.push(SourceCfg {
            name: "University News".to_string(),
            kind: SourceKind::PressPage,
            url: None,
            urls: PRESS_PAGES.iter().map(|u| u.to_string()).collect(),
            filing_type: None,
            count: None,
        });

        Self {
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
            regions: region_rules(),
            sectors: sector_rules(),
            sources,
            scoring: ScoringCfg {
                mode: ScoreMode::Count,
                default_weight: 1.0,
                categories: categories(),
                credibility: CredibilityCfg {
                    default: 1.0,
                    sources: CREDIBILITY
                        .iter()
                        .map(|(k, v)| (k.to_string(), *v))
                        .collect(),
                },
            },
            scraping: ScrapingCfg::default(),
        }
    }
}
