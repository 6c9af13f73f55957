// src/export.rs
//! Flat JSON / CSV renditions of a signal view.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::signal::SignalRecord;

pub const FILE_PREFIX: &str = "startup_signals";
pub const KEYWORD_DELIMITER: &str = "; ";

const CSV_HEADER: [&str; 11] = [
    "title",
    "source",
    "url",
    "summary",
    "publish_date",
    "keywords",
    "signal_score",
    "content_type",
    "region",
    "sector",
    "authors",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn render<'a, I>(self, records: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a SignalRecord>,
    {
        match self {
            ExportFormat::Json => to_json(records),
            ExportFormat::Csv => to_csv(records),
        }
    }
}

/// `startup_signals_20250310_120000.csv`
pub fn export_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{FILE_PREFIX}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Pretty JSON array; timestamps are RFC 3339.
pub fn to_json<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    let rows: Vec<&SignalRecord> = records.into_iter().collect();
    serde_json::to_string_pretty(&rows).context("serialize signals as json")
}

/// Header row plus one row per record; list fields are joined with `; `.
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a SignalRecord>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        let score = r.score.to_string();
        let published = r.published_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let keywords = r.keywords.join(KEYWORD_DELIMITER);
        let authors = r.authors.join(KEYWORD_DELIMITER);
        wtr.write_record([
            r.title.as_str(),
            r.source.as_str(),
            r.url.as_str(),
            r.summary.as_str(),
            published.as_str(),
            keywords.as_str(),
            score.as_str(),
            r.content_type.label(),
            r.region.as_str(),
            r.sector.as_str(),
            authors.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}
