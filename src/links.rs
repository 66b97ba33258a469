//! The flat text file between the collector and the downloader: one URL per line.

use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::Result;

/// Reads a link list, trimming lines and skipping blank ones.
pub async fn read_link_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Writes `links` one per line, replacing any existing file.
pub async fn write_link_list(path: impl AsRef<Path>, links: &[String]) -> Result<()> {
    let res_bytes = links
        .iter()
        .flat_map(|link| format!("{link}\n").into_bytes())
        .collect::<Vec<_>>();
    let mut file = File::create(path).await?;
    file.write_all(&res_bytes).await?;
    Ok(())
}

/// `"rust async book"` becomes `rust_async_book_download_links.txt`.
pub fn link_list_filename(search_term: &str) -> String {
    format!("{}_download_links.txt", search_term.replace(' ', "_"))
}
