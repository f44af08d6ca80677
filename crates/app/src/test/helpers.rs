//! Test Helpers

use std::{sync::Arc, time::Duration};

use crate::domain::{
    fetchers::{FetchError, MockPromotionFetcher, PromotionFetcher},
    promotions::{data::NewPromotion, records::PromotionRecord},
    stores::Store,
};

pub(crate) fn names(promotions: &[PromotionRecord]) -> Vec<&str> {
    promotions.iter().map(|p| p.name.as_str()).collect()
}

/// Fetcher that returns `listing` every time it is asked, `times` times.
pub(crate) fn listing_fetcher(
    store: Store,
    listing: &[&str],
    times: usize,
) -> Arc<dyn PromotionFetcher> {
    let listing: Vec<NewPromotion> = listing.iter().copied().map(NewPromotion::new).collect();
    let mut fetcher = MockPromotionFetcher::new();

    fetcher.expect_store().return_const(store);
    fetcher
        .expect_fetch()
        .times(times)
        .returning(move || Ok(listing.clone()));

    Arc::new(fetcher)
}

/// Fetcher that fails with an upstream status once.
pub(crate) fn failing_fetcher(store: Store, status: u16) -> Arc<dyn PromotionFetcher> {
    let mut fetcher = MockPromotionFetcher::new();

    fetcher.expect_store().return_const(store);
    fetcher
        .expect_fetch()
        .once()
        .returning(move || Err(FetchError::Status(status)));

    Arc::new(fetcher)
}

/// Fetcher that never answers within `delay`.
#[derive(Debug)]
pub(crate) struct StalledFetcher {
    pub(crate) store: Store,
    pub(crate) delay: Duration,
}

#[async_trait::async_trait]
impl PromotionFetcher for StalledFetcher {
    fn store(&self) -> Store {
        self.store
    }

    async fn fetch(&self) -> Result<Vec<NewPromotion>, FetchError> {
        tokio::time::sleep(self.delay).await;

        Ok(vec![NewPromotion::new("Too Late")])
    }
}
