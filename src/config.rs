use std::path::PathBuf;
use std::time::Duration;

use crate::{
    BROWSER_USER_AGENT, CATALOG_SEARCH_ENDPOINT, CHUNK_SIZE, CONNECT_TIMEOUT_SECS,
    DEFAULT_DELAY_SECS, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_DIR, REQUEST_TIMEOUT_SECS,
    RESULTS_PER_PAGE,
};

/// Settings for [`BatchDownloader`](crate::download::BatchDownloader).
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub output_dir: PathBuf,
    pub max_workers: usize,
    /// Slept by a worker after each successful download, before it picks up
    /// its next URL. Every worker sleeps on its own.
    pub delay: Duration,
    pub user_agent: String,
    pub chunk_size: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_workers: DEFAULT_MAX_WORKERS,
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            user_agent: BROWSER_USER_AGENT.to_string(),
            chunk_size: CHUNK_SIZE,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl DownloaderConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Settings for [`LinkCollector`](crate::collect::LinkCollector).
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Search page URL without its query string.
    pub search_endpoint: String,
    pub results_per_page: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            search_endpoint: CATALOG_SEARCH_ENDPOINT.to_string(),
            results_per_page: RESULTS_PER_PAGE,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl CollectorConfig {
    pub fn with_search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downloader_defaults() {
        let config = DownloaderConfig::new("books");
        assert_eq!(config.output_dir, PathBuf::from("books"));
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.chunk_size, 8192);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn builder_overrides() {
        let config = DownloaderConfig::default()
            .with_max_workers(8)
            .with_delay(Duration::from_millis(250))
            .with_user_agent("test-agent");
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.delay, Duration::from_millis(250));
        assert_eq!(config.user_agent, "test-agent");
    }
}
