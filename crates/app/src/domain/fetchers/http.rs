//! JSON feed fetcher.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::{
    fetchers::{FetchError, PromotionFetcher},
    promotions::data::NewPromotion,
    stores::Store,
};

/// Where a store's promotion feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFeed {
    pub store: Store,

    /// URL returning a JSON array of `{"name": ...}` objects.
    pub url: String,
}

/// Fetches a store's listing from a JSON feed over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPromotionFetcher {
    feed: StoreFeed,
    http: Client,
}

impl HttpPromotionFetcher {
    #[must_use]
    pub fn new(feed: StoreFeed, http: Client) -> Self {
        Self { feed, http }
    }
}

#[async_trait]
impl PromotionFetcher for HttpPromotionFetcher {
    fn store(&self) -> Store {
        self.feed.store
    }

    async fn fetch(&self) -> Result<Vec<NewPromotion>, FetchError> {
        debug!(store = %self.feed.store, url = %self.feed.url, "requesting promotion feed");

        let response = self.http.get(&self.feed.url).send().await?;

        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let listing: Vec<NewPromotion> = response.json().await?;

        Ok(listing)
    }
}
