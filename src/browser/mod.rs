//! Browser session used to search the site and capture article images.
//!
//! The scrape pipeline only talks to a [`Browser`]; extraction and
//! classification never see the network. [`nyt::NytBrowser`] drives the real
//! site over HTTP and parses the rendered search page with `scraper`.
//!
//! # Session lifecycle
//!
//! 1. [`Browser::open`] loads the home page and starts the session
//! 2. [`Browser::search`] runs the query, applying a section filter if asked
//! 3. [`Browser::screenshot`] returns the image whose alt text equals a title
//! 4. [`Browser::close`] releases the session; callers invoke it on every exit path

use crate::error::Result;
use crate::models::RawArticle;

pub mod nyt;

pub trait Browser {
    /// Open the site and start a session.
    async fn open(&mut self) -> Result<()>;

    /// Search for `phrase`, narrowed to the section whose label contains
    /// `category` when one is given. Results are returned in page order.
    async fn search(&mut self, phrase: &str, category: Option<&str>) -> Result<Vec<RawArticle>>;

    /// Image bytes for the result whose image alt text is exactly `title`.
    async fn screenshot(&self, title: &str) -> Result<Vec<u8>>;

    /// Release the session. Safe to call more than once.
    async fn close(&mut self);
}

#[cfg(test)]
pub mod fake {
    //! In-memory [`Browser`] for pipeline tests.

    use super::Browser;
    use crate::error::{Error, Result};
    use crate::models::RawArticle;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct FakeBrowser {
        pub results: Vec<RawArticle>,
        /// Title → image bytes.
        pub images: HashMap<String, Vec<u8>>,
        /// Category that the fake search rejects with `CategoryNotFound`.
        pub unknown_category: Option<String>,
        pub opened: bool,
        pub close_calls: usize,
        pub searches: Vec<(String, Option<String>)>,
    }

    impl Browser for FakeBrowser {
        async fn open(&mut self) -> Result<()> {
            self.opened = true;
            Ok(())
        }

        async fn search(&mut self, phrase: &str, category: Option<&str>) -> Result<Vec<RawArticle>> {
            self.searches
                .push((phrase.to_string(), category.map(String::from)));
            if let Some(category) = category {
                if self.unknown_category.as_deref() == Some(category) {
                    return Err(Error::CategoryNotFound(category.to_string()));
                }
            }
            Ok(self.results.clone())
        }

        async fn screenshot(&self, title: &str) -> Result<Vec<u8>> {
            self.images.get(title).cloned().ok_or_else(|| Error::ImageNotFound {
                title: title.to_string(),
            })
        }

        async fn close(&mut self) {
            self.close_calls += 1;
        }
    }
}
