//! Monetary-amount detection.
//!
//! An article mentions money when its title or description contains either a
//! dollar sign followed by digits/commas/periods (`$12,345.67`) or a number
//! followed by `dollars` or `USD` (`100 dollars`, `50USD`). Matching is
//! case-sensitive and searches anywhere in the text.

use crate::models::{ArticleRecord, NormalizedArticle};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Monetary-amount pattern, searched anywhere in a field.
pub const MONEY_PATTERN: &str = r"\$[\d,.]+|\d+\s*(dollars|USD)";

static MONEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(MONEY_PATTERN).expect("money pattern is a valid regex"));

/// Returns `true` if `text` contains a monetary amount anywhere.
pub fn contains_money(text: &str) -> bool {
    MONEY_RE.is_match(text)
}

/// Returns `true` if either field mentions money.
pub fn mentions_money(title: &str, description: &str) -> bool {
    contains_money(title) || contains_money(description)
}

/// Annotate a normalized article with its money flag.
pub fn classify(article: NormalizedArticle) -> ArticleRecord {
    let record = ArticleRecord::annotate(article);
    debug!(
        title = %record.title(),
        description = %truncate_for_log(record.description(), 80),
        has_money_mention = record.has_money_mention(),
        "Classified article"
    );
    record
}
