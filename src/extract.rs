//! Turn raw search-result text into classified, row-indexed records.
//!
//! Extraction is a pure transformation. Optional fields degrade to defaults:
//! a missing description becomes `""` and a missing date stays `None`. A
//! result without a title cannot be written or matched to its image, so it is
//! skipped with a warning before rows are numbered.

use crate::classify::classify;
use crate::models::{ArticleRecord, FIRST_DATA_ROW, IndexedRecord, NormalizedArticle, RawArticle};
use chrono::{DateTime, NaiveDate};
use tracing::{debug, info, instrument, warn};

/// Normalize one raw article. Returns `None` when the title is missing or blank.
pub fn normalize(raw: RawArticle) -> Option<NormalizedArticle> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return None;
    }

    if let Some(date) = raw.date.as_deref() {
        if !date.is_empty() && !is_iso_date(date) {
            debug!(%title, %date, "Unrecognized date format; keeping verbatim");
        }
    }

    Some(NormalizedArticle {
        title: title.to_string(),
        date: raw.date,
        description: raw
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Extract and classify every raw article, preserving page order.
#[instrument(level = "info", skip_all, fields(count = raws.len()))]
pub fn extract(raws: Vec<RawArticle>) -> Vec<ArticleRecord> {
    let total = raws.len();
    let records: Vec<ArticleRecord> = raws
        .into_iter()
        .enumerate()
        .filter_map(|(position, raw)| match normalize(raw) {
            Some(article) => Some(classify(article)),
            None => {
                warn!(position, "Search result has no title; skipping");
                None
            }
        })
        .collect();

    info!(
        total,
        extracted = records.len(),
        with_money = records.iter().filter(|r| r.has_money_mention()).count(),
        "Extracted articles"
    );
    records
}

/// Pair each record with its spreadsheet row, starting at [`FIRST_DATA_ROW`].
pub fn index_rows(records: Vec<ArticleRecord>) -> Vec<IndexedRecord> {
    (FIRST_DATA_ROW..)
        .zip(records)
        .map(|(row, record)| IndexedRecord { row, record })
        .collect()
}

fn is_iso_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
