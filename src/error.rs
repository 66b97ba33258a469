use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Bad status {status} for url: {url}")]
    BadStatus { url: String, status: StatusCode },
    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Url doesn't end with a file name: {0}")]
    MissingFileName(String),

    #[error("A worker pool needs at least one worker.")]
    NoWorkers,
    #[error("Not a valid number of pages: {0:?}")]
    InvalidPageCount(String),
}
