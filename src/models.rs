//! Data models for scraped search results.
//!
//! - [`RawArticle`]: per-article text exactly as the page exposed it
//! - [`NormalizedArticle`]: the same article after the extractor filled in defaults
//! - [`ArticleRecord`]: a normalized article annotated with its money flag
//! - [`IndexedRecord`]: an [`ArticleRecord`] paired with its spreadsheet row

use crate::classify::mentions_money;

/// Spreadsheet row of the first data record; row 1 holds the header.
pub const FIRST_DATA_ROW: u32 = 2;

/// One search result as read from the rendered page.
///
/// Every field is optional because any of the underlying elements may be
/// missing from a result node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    /// Text of the result headline.
    pub title: Option<String>,
    /// Text of the summary paragraph.
    pub description: Option<String>,
    /// The `datetime` attribute of the result's `<time>` element.
    pub date: Option<String>,
}

/// An article after normalization, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArticle {
    pub title: String,
    pub date: Option<String>,
    pub description: String,
}

/// An annotated article, ready for the output writers.
///
/// Fields are private: `has_money_mention` is always derived from `title`
/// and `description` at construction and the record is never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    title: String,
    date: Option<String>,
    description: String,
    has_money_mention: bool,
}

impl ArticleRecord {
    /// Annotate a normalized article with its money flag.
    pub fn annotate(article: NormalizedArticle) -> Self {
        let has_money_mention = mentions_money(&article.title, &article.description);
        Self {
            title: article.title,
            date: article.date,
            description: article.description,
            has_money_mention,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication date in the site's format, `None` if the page had none.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_money_mention(&self) -> bool {
        self.has_money_mention
    }
}

/// A record paired with the spreadsheet row it is written to.
///
/// The same row number names the record's image file, so both outputs stay
/// aligned without relying on enumeration order downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRecord {
    pub row: u32,
    pub record: ArticleRecord,
}
