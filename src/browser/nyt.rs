//! New York Times search session.
//!
//! Searches are run against `{base}/search?query=...&sort=best`, with the base
//! URL treated as a directory whether or not it ends in `/`. A category
//! filter is applied the way a user would: find the section checkbox whose
//! label contains the category text, then reload the results with that
//! section selected.
//!
//! # Page structure
//!
//! Each result is an `li` (`li.css-ye6x8s`, or the newer
//! `li[data-testid="search-bodega-result"]`) holding the headline in `h4`,
//! the summary in the first `p` and the publication time in
//! `time[datetime]`. Result thumbnails carry the headline as their alt text.

use super::Browser;
use crate::error::{Error, Result};
use crate::models::RawArticle;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) nyt_news_scraper/",
    env!("CARGO_PKG_VERSION")
);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RESULT_SELECTOR: &str = r#"li.css-ye6x8s, li[data-testid="search-bodega-result"]"#;
const TITLE_SELECTOR: &str = "h4";
const DESCRIPTION_SELECTOR: &str = "p";
const DATE_SELECTOR: &str = "time";
const SECTION_LABEL_SELECTOR: &str = "label";
const SECTION_INPUT_SELECTOR: &str = r#"input[type="checkbox"][value]"#;
const IMAGE_SELECTOR: &str = "img[alt][src]";

/// HTTP-backed browser session for nytimes.com.
#[derive(Debug)]
pub struct NytBrowser {
    client: Client,
    base_url: Url,
    /// Alt text → absolute image URL, taken from the last results page.
    images: HashMap<String, Url>,
    open: bool,
}

impl NytBrowser {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            images: HashMap::new(),
            open: false,
        })
    }

    fn search_url(&self, phrase: &str, section: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join("search")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("query", phrase).append_pair("sort", "best");
            if let Some(section) = section {
                query.append_pair("sections", section);
            }
        }
        Ok(url)
    }

    async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

impl Browser for NytBrowser {
    #[instrument(level = "info", skip_all, fields(url = %self.base_url))]
    async fn open(&mut self) -> Result<()> {
        self.fetch_html(&self.base_url).await?;
        self.open = true;
        info!("Opened browser session");
        Ok(())
    }

    #[instrument(level = "info", skip(self))]
    async fn search(&mut self, phrase: &str, category: Option<&str>) -> Result<Vec<RawArticle>> {
        let mut url = self.search_url(phrase, None)?;
        let mut html = self.fetch_html(&url).await?;

        if let Some(category) = category {
            let section = find_section_filter(&html, category)?
                .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;
            info!(%category, %section, "Applying section filter");
            url = self.search_url(phrase, Some(&section))?;
            html = self.fetch_html(&url).await?;
        }

        let articles = parse_results(&html)?;
        self.images = index_images(&html, &url)?;
        info!(
            results = articles.len(),
            images = self.images.len(),
            %url,
            "Search results loaded"
        );
        Ok(articles)
    }

    #[instrument(level = "debug", skip(self))]
    async fn screenshot(&self, title: &str) -> Result<Vec<u8>> {
        let src = self.images.get(title).ok_or_else(|| Error::ImageNotFound {
            title: title.to_string(),
        })?;
        let bytes = self
            .client
            .get(src.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(%src, bytes = bytes.len(), "Fetched article image");
        Ok(bytes.to_vec())
    }

    async fn close(&mut self) {
        if !self.open {
            debug!("Browser session already closed");
            return;
        }
        self.images.clear();
        self.open = false;
        info!("Closed browser session");
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e}")))
}

fn first_text(node: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Read every search result on the page, in page order.
pub fn parse_results(html: &str) -> Result<Vec<RawArticle>> {
    let document = Html::parse_document(html);
    let result_selector = selector(RESULT_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let description_selector = selector(DESCRIPTION_SELECTOR)?;
    let date_selector = selector(DATE_SELECTOR)?;

    let articles = document
        .select(&result_selector)
        .map(|node| RawArticle {
            title: first_text(&node, &title_selector),
            description: first_text(&node, &description_selector),
            date: node
                .select(&date_selector)
                .next()
                .and_then(|el| el.value().attr("datetime"))
                .map(String::from),
        })
        .collect();
    Ok(articles)
}

/// Value of the section checkbox whose label contains `category`.
pub fn find_section_filter(html: &str, category: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let label_selector = selector(SECTION_LABEL_SELECTOR)?;
    let input_selector = selector(SECTION_INPUT_SELECTOR)?;

    Ok(document
        .select(&label_selector)
        .filter(|label| label.text().collect::<String>().contains(category))
        .find_map(|label| {
            label
                .select(&input_selector)
                .next()
                .and_then(|input| input.value().attr("value"))
                .map(String::from)
        }))
}

/// Map trimmed image alt text to absolute image URLs. The first image with a
/// given alt text wins.
pub fn index_images(html: &str, page_url: &Url) -> Result<HashMap<String, Url>> {
    let document = Html::parse_document(html);
    let image_selector = selector(IMAGE_SELECTOR)?;

    let mut images = HashMap::new();
    for img in document.select(&image_selector) {
        let (Some(alt), Some(src)) = (img.value().attr("alt"), img.value().attr("src")) else {
            continue;
        };
        match page_url.join(src) {
            Ok(url) => {
                images.entry(alt.trim().to_string()).or_insert(url);
            }
            Err(e) => warn!(%alt, %src, error = %e, "Skipping image with unresolvable src"),
        }
    }
    Ok(images)
}
