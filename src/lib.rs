//! Finds downloadable documents on a catalog site and fetches them to disk.
//!
//! Two halves that only meet through a flat text file:
//! - [`collect::LinkCollector`] walks the paginated search results and writes
//!   one direct download link per line.
//! - [`download::BatchDownloader`] reads such a list and fetches every link
//!   with a fixed pool of workers.

mod macros;

pub mod collect;
pub mod config;
pub mod download;
mod error;
pub mod filename;
pub mod links;
pub mod logging;
pub mod parse;
pub mod pool;
pub mod prompt;
pub mod report;
mod request;

pub use error::{Error, Result};

pub const DEFAULT_MAX_WORKERS: usize = 3;
pub const DEFAULT_DELAY_SECS: f64 = 1.0;
/// Size of the write buffer the response body is streamed through.
pub const CHUNK_SIZE: usize = 8 * 1024;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
/// Applies to the whole request, body included.
pub const REQUEST_TIMEOUT_SECS: u64 = 300;

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DOWNLOAD_LOG_FILE: &str = "download_log.txt";
pub const DEFAULT_INPUT_FILE: &str = "download_links.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "downloaded_books";

pub const CATALOG_SEARCH_ENDPOINT: &str = "https://libgen.is/search.php";
pub const RESULTS_PER_PAGE: usize = 100;
pub const DEFAULT_NUM_PAGES: usize = 25;
/// `title` attribute of the anchor that leads from a result row to its record page.
pub const RECORD_ANCHOR_TITLE: &str = "Libgen & IPFS & Tor";
/// Visible text of the direct download anchor on a record page.
pub const DOWNLOAD_ANCHOR_TEXT: &str = "GET";
