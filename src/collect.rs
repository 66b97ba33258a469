//! The link collector.
//!
//! Walks the search result pages one after another, visits every record page
//! they point to and keeps the direct download link found there. Everything
//! is sequential. A page that fails to load aborts the whole run; a record
//! page without a download link is only logged and skipped.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use reqwest::Client;
use tokio::task::spawn_blocking;
use url::Url;

use crate::config::CollectorConfig;
use crate::parse::{find_download_link, parse_result_page};
use crate::record;
use crate::report::{Level, Reporter};
use crate::request::{build_client, fetch_html};
use crate::Result;

pub struct LinkCollector {
    client: Client,
    config: CollectorConfig,
    reporter: Arc<dyn Reporter>,
}

impl LinkCollector {
    pub fn new(config: CollectorConfig, reporter: Arc<dyn Reporter>) -> Result<Self> {
        // No explicit User-Agent on catalog requests.
        let client = build_client(None, config.connect_timeout, config.request_timeout)?;
        Ok(Self {
            client,
            config,
            reporter,
        })
    }

    /// URL of the zero-based result page `page` for `search_term`.
    pub fn search_url(&self, search_term: &str, page: usize) -> String {
        format!(
            "{}?&res={}&req={}&phrase=1&view=simple&column=def&sort=def&sortmode=ASC&page={}",
            self.config.search_endpoint,
            self.config.results_per_page,
            urlencoding::encode(search_term),
            page
        )
    }

    /// Record page links found on one result page.
    pub async fn process_page(&self, url: &str) -> Result<Vec<String>> {
        let html = fetch_html(&self.client, url).await?;
        let page_url = url.to_string();
        spawn_blocking(move || parse_result_page(&html, &page_url)).await?
    }

    /// The absolute download link on a record page, or `None` (with a warning)
    /// when the page doesn't have one.
    pub async fn get_download_link(&self, url: &str) -> Result<Option<String>> {
        let html = fetch_html(&self.client, url).await?;
        let href = spawn_blocking(move || find_download_link(&html)).await?;

        match href {
            Some(href) => Ok(Some(Url::parse(url)?.join(&href)?.to_string())),
            None => {
                record!(self.reporter, Level::WARN, "Could not find 'GET' link in {}", url);
                Ok(None)
            }
        }
    }

    /// Collects the deduplicated download links of the first `num_pages`
    /// result pages. The order of the returned links is unspecified.
    pub async fn search(&self, search_term: &str, num_pages: usize) -> Result<Vec<String>> {
        let start_time = Local::now();

        let mut record_links = Vec::new();
        for page in 0..num_pages {
            record!(self.reporter, Level::INFO, "Processing page {}/{}...", page + 1, num_pages);
            let page_links = self.process_page(&self.search_url(search_term, page)).await?;
            record_links.extend(page_links);
        }

        record!(
            self.reporter,
            Level::INFO,
            "Found {} initial links. Getting download links...",
            record_links.len()
        );

        let mut download_links = HashSet::new();
        for (i, link) in record_links.iter().enumerate() {
            record!(
                self.reporter,
                Level::INFO,
                "Processing link {}/{}...",
                i + 1,
                record_links.len()
            );
            if let Some(download_link) = self.get_download_link(link).await? {
                download_links.insert(download_link);
            }
        }

        record!(
            self.reporter,
            Level::INFO,
            start_time,
            "Collected {} unique download links",
            download_links.len()
        );
        Ok(download_links.into_iter().collect())
    }
}
