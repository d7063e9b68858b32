//! Error type shared by every stage of a scrape run.
//!
//! Optional page fields (description, date) never produce an error; they
//! degrade to empty values during extraction. Everything here is either a
//! configuration problem caught before the browser opens, or a failure that
//! aborts the run (after the browser session has been closed).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Work item is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Work-item file contains no items")]
    NoWorkItem,

    #[error("Work item variable `{0}` is missing or blank")]
    MissingVariable(&'static str),

    #[error("Work item variable `{name}` has invalid value {value:?}")]
    InvalidVariable { name: &'static str, value: String },

    #[error("No search filter matches category {0:?}")]
    CategoryNotFound(String),

    #[error("No image found with alt text {title:?}")]
    ImageNotFound { title: String },
}

pub type Result<T> = std::result::Result<T, Error>;
