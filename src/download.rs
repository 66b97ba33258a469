//! The batch downloader.
//!
//! Every URL is fetched by one of `max_workers` workers and streamed to
//! `<output_dir>/<file name>`. A failing URL is logged and counted, never
//! propagated, so one bad link can't stop the batch.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::config::DownloaderConfig;
use crate::filename::filename_from_url;
use crate::pool::{map_bounded_with_cooldown, Progress};
use crate::record;
use crate::report::{Level, Reporter};
use crate::request::{build_client, get_checked};
use crate::Result;

/// Aggregate outcome of [`BatchDownloader::download_all`].
///
/// `successful + failed + skipped == total`; `skipped` only grows when the
/// batch is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DownloadSummary {
    fn from_outcomes(outcomes: &[Option<bool>]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                Some(true) => summary.successful += 1,
                Some(false) => summary.failed += 1,
                None => summary.skipped += 1,
            }
        }
        summary
    }
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Download Summary:")?;
        writeln!(f, "Total links processed: {}", self.total)?;
        writeln!(f, "Successfully downloaded: {}", self.successful)?;
        write!(f, "Failed downloads: {}", self.failed)?;
        if self.skipped > 0 {
            write!(f, "\nSkipped (cancelled): {}", self.skipped)?;
        }
        Ok(())
    }
}

/// Cheap to clone: the client and the reporter sit behind `Arc`s.
#[derive(Clone)]
pub struct BatchDownloader {
    client: Client,
    config: Arc<DownloaderConfig>,
    reporter: Arc<dyn Reporter>,
}

impl BatchDownloader {
    /// Creates the output directory if it doesn't exist yet.
    pub async fn new(config: DownloaderConfig, reporter: Arc<dyn Reporter>) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).await?;
        let client = build_client(
            Some(config.user_agent.as_str()),
            config.connect_timeout,
            config.request_timeout,
        )?;
        Ok(Self {
            client,
            config: Arc::new(config),
            reporter,
        })
    }

    /// Downloads a single URL. Returns whether it succeeded; the reason for a
    /// failure only ends up in the log.
    ///
    /// After a success the calling worker sleeps for `delay`.
    pub async fn fetch_one(&self, url: &str) -> bool {
        let ok = self.download_one(url).await;
        sleep(self.cooldown(ok)).await;
        ok
    }

    async fn download_one(&self, url: &str) -> bool {
        match self.save_to_disk(url).await {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                record!(self.reporter, Level::INFO, "Successfully downloaded: {}", filename);
                true
            }
            Err(e) => {
                record!(self.reporter, Level::ERROR, "Failed to download {}: {}", url, e);
                false
            }
        }
    }

    /// Only successes are throttled.
    fn cooldown(&self, succeeded: bool) -> Duration {
        if succeeded {
            self.config.delay
        } else {
            Duration::ZERO
        }
    }

    /// Streams the body of `url` into the output directory, overwriting any
    /// file of the same name. A failure halfway through may leave a truncated file.
    async fn save_to_disk(&self, url: &str) -> Result<PathBuf> {
        let res = get_checked(&self.client, url).await?;
        let save_path = self.config.output_dir.join(filename_from_url(url)?);

        let file = File::create(&save_path).await?;
        let mut writer = BufWriter::with_capacity(self.config.chunk_size, file);
        let mut body = res.bytes_stream();
        while let Some(chunk) = body.next().await {
            writer.write_all(&chunk?).await?;
        }
        writer.flush().await?;

        Ok(save_path)
    }

    /// Downloads every URL across the worker pool.
    ///
    /// Duplicates are fetched as many times as they appear. `on_progress` runs
    /// after each finished URL, in completion order.
    pub async fn download_all<P>(
        &self,
        urls: Vec<String>,
        cancel: &CancellationToken,
        on_progress: P,
    ) -> Result<DownloadSummary>
    where
        P: FnMut(Progress),
    {
        let start_time = Local::now();
        let outcomes = map_bounded_with_cooldown(
            urls,
            self.config.max_workers,
            cancel,
            {
                let this = self.clone();
                move |url: String| {
                    let this = this.clone();
                    async move { this.download_one(&url).await }
                }
            },
            {
                let this = self.clone();
                move |ok: &bool| this.cooldown(*ok)
            },
            on_progress,
        )
        .await?;

        let summary = DownloadSummary::from_outcomes(&outcomes);
        record!(
            self.reporter,
            Level::INFO,
            start_time,
            "Batch finished: {} ok, {} failed, {} skipped",
            summary.successful,
            summary.failed,
            summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_outcome() {
        let summary =
            DownloadSummary::from_outcomes(&[Some(true), Some(false), None, Some(true)]);
        assert_eq!(
            summary,
            DownloadSummary {
                total: 4,
                successful: 2,
                failed: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn summary_hides_skipped_when_zero() {
        let text = DownloadSummary::from_outcomes(&[Some(true), Some(false)]).to_string();
        assert!(text.contains("Total links processed: 2"));
        assert!(text.contains("Successfully downloaded: 1"));
        assert!(text.contains("Failed downloads: 1"));
        assert!(!text.contains("Skipped"));
    }
}
