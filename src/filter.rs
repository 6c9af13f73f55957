// src/filter.rs
//! Read-side query over an aggregated collection, plus summary statistics.
//!
//! Every predicate is independent; unset, empty, `All` and zero values match
//! everything. The result is the AND of all set predicates and keeps the input
//! order, so predicate order never matters.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::window_start;
use crate::signal::SignalRecord;

/// Placeholder meaning "any value" for region, sector and source.
pub const ANY: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalFilter {
    /// Case-insensitive substring over title, summary and matched keywords.
    pub keyword: Option<String>,
    pub region: Option<String>,
    pub sector: Option<String>,
    pub source: Option<String>,
    /// Only records published within the last `days` days.
    pub days: Option<u32>,
    pub min_score: Option<f64>,
}

fn active(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ANY)
}

impl SignalFilter {
    pub fn apply<'a>(&self, records: &'a [SignalRecord]) -> Vec<&'a SignalRecord> {
        self.apply_at(records, Utc::now())
    }

    /// Same as [`apply`](Self::apply) with an explicit clock for the `days` predicate.
    pub fn apply_at<'a>(
        &self,
        records: &'a [SignalRecord],
        now: DateTime<Utc>,
    ) -> Vec<&'a SignalRecord> {
        let needle = active(&self.keyword).map(str::to_lowercase);
        let region = active(&self.region);
        let sector = active(&self.sector);
        let source = active(&self.source);
        let since = self
            .days
            .filter(|d| *d > 0)
            .map(|d| window_start(now, d));
        let min_score = self.min_score.filter(|s| *s > 0.0);

        records
            .iter()
            .filter(|r| needle.as_deref().map_or(true, |n| mentions(r, n)))
            .filter(|r| region.map_or(true, |v| r.region == v))
            .filter(|r| sector.map_or(true, |v| r.sector == v))
            .filter(|r| source.map_or(true, |v| r.source == v))
            .filter(|r| since.map_or(true, |t| r.published_at >= t))
            .filter(|r| min_score.map_or(true, |m| r.score >= m))
            .collect()
    }
}

fn mentions(r: &SignalRecord, needle: &str) -> bool {
    r.title.to_lowercase().contains(needle)
        || r.summary.to_lowercase().contains(needle)
        || r.keywords.iter().any(|k| k.to_lowercase().contains(needle))
}

/// Headline numbers and breakdowns over a (filtered) view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalDigest {
    pub total: usize,
    pub average_score: Option<f64>,
    pub top_source: Option<String>,
    pub by_source: BTreeMap<String, usize>,
    pub by_sector: BTreeMap<String, usize>,
    pub by_region: BTreeMap<String, usize>,
    pub by_content_type: BTreeMap<String, usize>,
    pub daily_volume: BTreeMap<NaiveDate, usize>,
}

impl SignalDigest {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SignalRecord>,
    {
        let mut d = SignalDigest::default();
        let mut score_sum = 0.0;
        for r in records {
            d.total += 1;
            score_sum += r.score;
            *d.by_source.entry(r.source.clone()).or_default() += 1;
            *d.by_sector.entry(r.sector.clone()).or_default() += 1;
            *d.by_region.entry(r.region.clone()).or_default() += 1;
            *d.by_content_type
                .entry(r.content_type.label().to_string())
                .or_default() += 1;
            *d.daily_volume.entry(r.published_at.date_naive()).or_default() += 1;
        }
        if d.total > 0 {
            d.average_score = Some(score_sum / d.total as f64);
        }
        // highest count; ties go to the alphabetically first name
        d.top_source = d
            .by_source
            .iter()
            .fold(None::<(&String, usize)>, |best, (name, n)| match best {
                Some((_, m)) if m >= *n => best,
                _ => Some((name, *n)),
            })
            .map(|(name, _)| name.clone());
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::ContentType;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn rec(title: &str, source: &str, region: &str, sector: &str, score: f64, age_days: i64) -> SignalRecord {
        SignalRecord {
            id: title.to_string(),
            title: title.to_string(),
            source: source.to_string(),
            url: String::new(),
            summary: String::new(),
            published_at: now() - chrono::Duration::days(age_days),
            keywords: vec!["seed round".into()],
            score,
            content_type: ContentType::Feed,
            region: region.to_string(),
            sector: sector.to_string(),
            authors: Vec::new(),
        }
    }

    fn sample() -> Vec<SignalRecord> {
        vec![
            rec("Acme fintech raise", "TechCrunch", "New York", "Fintech", 3.0, 1),
            rec("Bolt robotics", "VentureBeat", "Boston", "Robotics", 1.0, 2),
            rec("Corto ai launch", "TechCrunch", "New York", "AI/ML", 2.0, 10),
            rec("Delta payments", "Wired", "London", "Fintech", 1.0, 0),
        ]
    }

    fn titles(v: Vec<&SignalRecord>) -> Vec<String> {
        v.into_iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn default_filter_is_identity() {
        let data = sample();
        let f = SignalFilter::default();
        assert_eq!(f.apply_at(&data, now()).len(), data.len());
    }

    #[test]
    fn placeholder_values_are_noops() {
        let data = sample();
        let f = SignalFilter {
            keyword: Some("  ".into()),
            region: Some("All".into()),
            sector: Some(String::new()),
            source: Some("All".into()),
            days: Some(0),
            min_score: Some(0.0),
        };
        assert_eq!(f.apply_at(&data, now()).len(), data.len());
    }

    #[test]
    fn keyword_searches_title_summary_and_keywords() {
        let data = sample();
        let f = SignalFilter {
            keyword: Some("ACME".into()),
            ..Default::default()
        };
        assert_eq!(titles(f.apply_at(&data, now())), vec!["Acme fintech raise"]);

        let f = SignalFilter {
            keyword: Some("seed".into()),
            ..Default::default()
        };
        assert_eq!(f.apply_at(&data, now()).len(), 4);
    }

    #[test]
    fn predicates_combine_with_and() {
        let data = sample();
        let f = SignalFilter {
            sector: Some("Fintech".into()),
            min_score: Some(2.0),
            ..Default::default()
        };
        assert_eq!(titles(f.apply_at(&data, now())), vec!["Acme fintech raise"]);

        let f = SignalFilter {
            source: Some("TechCrunch".into()),
            days: Some(7),
            ..Default::default()
        };
        assert_eq!(titles(f.apply_at(&data, now())), vec!["Acme fintech raise"]);
    }

    #[test]
    fn huge_day_window_keeps_everything() {
        let data = sample();
        let f = SignalFilter {
            days: Some(u32::MAX),
            ..Default::default()
        };
        assert_eq!(f.apply_at(&data, now()).len(), data.len());
        assert_eq!(f.apply(&data).len(), data.len());
    }

    #[test]
    fn composition_is_commutative() {
        let data = sample();
        let by_kw = SignalFilter {
            keyword: Some("a".into()),
            ..Default::default()
        };
        let by_region = SignalFilter {
            region: Some("New York".into()),
            ..Default::default()
        };
        let both = SignalFilter {
            keyword: Some("a".into()),
            region: Some("New York".into()),
            ..Default::default()
        };

        let kw_then_region: Vec<SignalRecord> = by_kw
            .apply_at(&data, now())
            .into_iter()
            .cloned()
            .collect();
        let a = titles(by_region.apply_at(&kw_then_region, now()));

        let region_then_kw: Vec<SignalRecord> = by_region
            .apply_at(&data, now())
            .into_iter()
            .cloned()
            .collect();
        let b = titles(by_kw.apply_at(&region_then_kw, now()));

        assert_eq!(a, b);
        assert_eq!(a, titles(both.apply_at(&data, now())));
    }

    #[test]
    fn filter_keeps_input_order() {
        let data = sample();
        let f = SignalFilter {
            sector: Some("Fintech".into()),
            ..Default::default()
        };
        assert_eq!(
            titles(f.apply_at(&data, now())),
            vec!["Acme fintech raise", "Delta payments"]
        );
    }

    #[test]
    fn digest_counts_and_top_source() {
        let data = sample();
        let d = SignalDigest::from_records(&data);
        assert_eq!(d.total, 4);
        assert_eq!(d.average_score, Some(7.0 / 4.0));
        assert_eq!(d.top_source.as_deref(), Some("TechCrunch"));
        assert_eq!(d.by_sector["Fintech"], 2);
        assert_eq!(d.by_region["New York"], 2);
        assert_eq!(d.by_content_type["RSS Feed"], 4);
        assert_eq!(d.daily_volume.values().sum::<usize>(), 4);
    }

    #[test]
    fn digest_of_nothing_is_empty() {
        let d = SignalDigest::from_records(std::iter::empty());
        assert_eq!(d.total, 0);
        assert!(d.average_score.is_none());
        assert!(d.top_source.is_none());
    }

    #[test]
    fn top_source_tie_goes_to_first_name() {
        let data = vec![
            rec("x", "Wired", "Other", "Other", 1.0, 0),
            rec("y", "Axios", "Other", "Other", 1.0, 0),
        ];
        let d = SignalDigest::from_records(&data);
        assert_eq!(d.top_source.as_deref(), Some("Axios"));
    }
}
