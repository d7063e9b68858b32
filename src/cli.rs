//! Command-line interface definitions.
//!
//! Run variables normally arrive through a work-item file; every one of them
//! can also be passed as a flag or environment variable, which takes
//! precedence over the work item.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Variables from a work-item file
/// nyt_news_scraper --work-item devdata/work-items-in/input.json
///
/// # Variables from flags
/// nyt_news_scraper -s "interest rates" -c Business -n 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Work-item JSON file supplying `search_phrase`, `category_or_section` and `number_of_months`
    #[arg(short, long, env = "RPA_INPUT_WORKITEM_PATH")]
    pub work_item: Option<PathBuf>,

    /// Phrase to search for (overrides the work item)
    #[arg(short, long, env = "SEARCH_PHRASE")]
    pub search_phrase: Option<String>,

    /// News category or section to filter by (overrides the work item)
    #[arg(short, long, env = "CATEGORY_OR_SECTION")]
    pub category: Option<String>,

    /// Number of months of results (overrides the work item; accepted but not applied)
    #[arg(short = 'n', long, env = "NUMBER_OF_MONTHS")]
    pub months: Option<String>,

    /// Directory receiving `news_data.xlsx` and `images/`
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Site root to search
    #[arg(long, env = "NYT_BASE_URL", default_value = "https://www.nytimes.com/")]
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn default_of(id: &str) -> Vec<String> {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap();
        arg.get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_cli_defaults() {
        assert_eq!(default_of("output_dir"), ["output"]);
        assert_eq!(default_of("base_url"), ["https://www.nytimes.com/"]);
        assert!(default_of("category").is_empty());
        assert!(default_of("months").is_empty());
    }

    #[test]
    fn test_cli_env_names() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("work_item").as_deref(), Some("RPA_INPUT_WORKITEM_PATH"));
        assert_eq!(env_of("search_phrase").as_deref(), Some("SEARCH_PHRASE"));
        assert_eq!(env_of("category").as_deref(), Some("CATEGORY_OR_SECTION"));
        assert_eq!(env_of("months").as_deref(), Some("NUMBER_OF_MONTHS"));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "nyt_news_scraper",
            "--search-phrase",
            "tariffs",
            "--output-dir",
            "exports",
            "--base-url",
            "https://example.test/",
        ]);

        assert_eq!(cli.search_phrase.as_deref(), Some("tariffs"));
        assert_eq!(cli.output_dir, PathBuf::from("exports"));
        assert_eq!(cli.base_url, "https://example.test/");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "nyt_news_scraper",
            "-w",
            "/tmp/input.json",
            "-s",
            "climate",
            "-c",
            "Science",
            "-n",
            "2",
            "-o",
            "/tmp/out",
        ]);

        assert_eq!(cli.work_item, Some(PathBuf::from("/tmp/input.json")));
        assert_eq!(cli.search_phrase.as_deref(), Some("climate"));
        assert_eq!(cli.category.as_deref(), Some("Science"));
        assert_eq!(cli.months.as_deref(), Some("2"));
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
    }
}
