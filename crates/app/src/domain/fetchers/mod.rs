//! Store Fetchers
//!
//! A fetcher turns one retailer's promotion feed into [`NewPromotion`]s. How a
//! store publishes its listing is the fetcher's business; the refresh cycle
//! only sees the resulting names or an error.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{promotions::data::NewPromotion, stores::Store};

mod errors;
mod http;

pub use errors::FetchError;
pub use http::{HttpPromotionFetcher, StoreFeed};

#[automock]
#[async_trait]
pub trait PromotionFetcher: Send + Sync {
    /// Store whose listing this fetcher produces.
    fn store(&self) -> Store;

    /// Fetches the store's current promotion listing.
    async fn fetch(&self) -> Result<Vec<NewPromotion>, FetchError>;
}
