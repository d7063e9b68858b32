//! One scrape run, from opening the site to writing the exports.
//!
//! The browser session is closed on every exit path: after a successful
//! export and after any failure along the way.

use crate::browser::Browser;
use crate::error::Result;
use crate::extract::{extract, index_rows};
use crate::outputs::OutputPaths;
use crate::outputs::images::write_images;
use crate::outputs::spreadsheet::write_spreadsheet;
use crate::workitem::RunConfig;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Result nodes on the search page.
    pub found: usize,
    /// Rows written to the spreadsheet.
    pub records: usize,
    pub images_written: usize,
    /// Rows whose image could not be found.
    pub images_missing: Vec<u32>,
    pub spreadsheet: PathBuf,
    pub images_dir: PathBuf,
}

/// Run the search and write both exports, then close the browser.
#[instrument(
    level = "info",
    skip_all,
    fields(search_phrase = %config.search_phrase, category = ?config.category)
)]
pub async fn run<B: Browser>(
    browser: &mut B,
    config: &RunConfig,
    outputs: &OutputPaths,
) -> Result<RunSummary> {
    let result = scrape(browser, config, outputs).await;
    browser.close().await;

    match &result {
        Ok(summary) => info!(
            found = summary.found,
            records = summary.records,
            images_written = summary.images_written,
            images_missing = summary.images_missing.len(),
            "Scrape run complete"
        ),
        Err(e) => error!(error = %e, "Scrape run failed"),
    }
    result
}

async fn scrape<B: Browser>(
    browser: &mut B,
    config: &RunConfig,
    outputs: &OutputPaths,
) -> Result<RunSummary> {
    browser.open().await?;

    let raws = browser
        .search(&config.search_phrase, config.category.as_deref())
        .await?;
    let found = raws.len();
    let rows = index_rows(extract(raws));

    write_spreadsheet(&rows, &outputs.spreadsheet).await?;
    let images = write_images(&*browser, &rows, &outputs.images_dir).await?;

    Ok(RunSummary {
        found,
        records: rows.len(),
        images_written: images.written,
        images_missing: images.missing,
        spreadsheet: outputs.spreadsheet.clone(),
        images_dir: outputs.images_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;
    use crate::error::Error;
    use crate::models::RawArticle;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn config(category: Option<&str>) -> RunConfig {
        RunConfig {
            search_phrase: "economy".to_string(),
            category: category.map(String::from),
            number_of_months: None,
        }
    }

    fn fake_browser() -> FakeBrowser {
        let mut browser = FakeBrowser {
            results: vec![
                RawArticle {
                    title: Some("Economy grows".to_string()),
                    description: Some(String::new()),
                    date: Some("2024-01-05".to_string()),
                },
                RawArticle {
                    title: None,
                    description: Some("headline missing".to_string()),
                    date: None,
                },
                RawArticle {
                    title: Some("Markets up $3 today".to_string()),
                    description: Some("Analysts say 10 dollars matters".to_string()),
                    date: None,
                },
            ],
            ..FakeBrowser::default()
        };
        browser.images.insert("Economy grows".to_string(), PNG.to_vec());
        browser
    }

    #[tokio::test]
    async fn test_run_writes_outputs_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::under(dir.path());
        let mut browser = fake_browser();

        let summary = run(&mut browser, &config(Some("Business")), &outputs)
            .await
            .unwrap();

        assert!(browser.opened);
        assert_eq!(browser.close_calls, 1);
        assert_eq!(
            browser.searches,
            vec![("economy".to_string(), Some("Business".to_string()))]
        );

        assert_eq!(summary.found, 3);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.images_written, 1);
        assert_eq!(summary.images_missing, vec![3]);

        assert!(outputs.spreadsheet.is_file());
        assert!(outputs.images_dir.join("2.png").is_file());
        assert!(!outputs.images_dir.join("3.png").exists());
    }

    #[tokio::test]
    async fn test_run_closes_browser_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::under(dir.path());
        let mut browser = FakeBrowser {
            unknown_category: Some("Nonexistent".to_string()),
            ..fake_browser()
        };

        let result = run(&mut browser, &config(Some("Nonexistent")), &outputs).await;

        assert!(matches!(result, Err(Error::CategoryNotFound(ref c)) if c == "Nonexistent"));
        assert_eq!(browser.close_calls, 1);
        assert!(!outputs.spreadsheet.exists());
    }

    #[tokio::test]
    async fn test_run_with_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::under(dir.path());
        let mut browser = FakeBrowser::default();

        let summary = run(&mut browser, &config(None), &outputs).await.unwrap();

        assert_eq!(summary.records, 0);
        assert_eq!(browser.searches, vec![("economy".to_string(), None)]);
        assert!(outputs.spreadsheet.is_file());
        assert_eq!(browser.close_calls, 1);
    }
}
