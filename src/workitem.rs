//! Work-item input and run configuration.
//!
//! A work-item file is the JSON an automation orchestrator drops next to the
//! run: either a list of items (the first one is used) or a single item, each
//! carrying its variables under `payload`:
//!
//! ```json
//! [{ "payload": { "search_phrase": "inflation",
//!                 "category_or_section": "Business",
//!                 "number_of_months": 2 },
//!    "files": {} }]
//! ```
//!
//! Variables may be JSON strings or numbers. Values given on the command line
//! override the work item.

use crate::cli::Cli;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

pub const SEARCH_PHRASE: &str = "search_phrase";
pub const CATEGORY_OR_SECTION: &str = "category_or_section";
pub const NUMBER_OF_MONTHS: &str = "number_of_months";

/// One unit of input delivered to a run.
#[derive(Debug, Default, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub payload: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkItemFile {
    Many(Vec<WorkItem>),
    One(WorkItem),
}

impl WorkItem {
    /// Parse work-item JSON, taking the first item of a list.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<WorkItemFile>(json)? {
            WorkItemFile::One(item) => Ok(item),
            WorkItemFile::Many(items) => items
                .into_iter()
                .next()
                .ok_or(Error::NoWorkItem),
        }
    }

    /// Read and parse a work-item file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).await?;
        let item = Self::from_json(&json)?;
        info!(variables = item.payload.len(), "Loaded work item");
        Ok(item)
    }

    /// A variable rendered as text. Strings are returned as-is, numbers and
    /// booleans are formatted, `null` counts as absent.
    pub fn variable(&self, name: &str) -> Option<String> {
        match self.payload.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub search_phrase: String,
    /// `None` means do not filter by category.
    pub category: Option<String>,
    /// Accepted and validated, but no date-range filtering is performed.
    pub number_of_months: Option<u32>,
}

impl RunConfig {
    /// Merge command-line values over the work item and validate the result.
    pub fn resolve(cli: &Cli, item: &WorkItem) -> Result<Self> {
        let pick = |flag: &Option<String>, name: &str| flag.clone().or_else(|| item.variable(name));

        let search_phrase = non_blank(pick(&cli.search_phrase, SEARCH_PHRASE))
            .ok_or(Error::MissingVariable(SEARCH_PHRASE))?;
        let category = non_blank(pick(&cli.category, CATEGORY_OR_SECTION));
        let number_of_months = non_blank(pick(&cli.months, NUMBER_OF_MONTHS))
            .map(|months| parse_months(&months))
            .transpose()?;

        if let Some(months) = number_of_months {
            warn!(
                number_of_months = months,
                "number_of_months is accepted but results are not filtered by date"
            );
        }

        Ok(Self {
            search_phrase,
            category,
            number_of_months,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_months(value: &str) -> Result<u32> {
    value.parse().map_err(|_| Error::InvalidVariable {
        name: NUMBER_OF_MONTHS,
        value: value.to_string(),
    })
}
