//! Fetcher errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("promotion feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("promotion feed responded with status {0}")]
    Status(u16),

    #[error("promotion feed did not respond within {0:?}")]
    TimedOut(Duration),
}
