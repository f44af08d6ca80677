//! Refresh Orchestrator

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::{sync::Mutex, time::timeout};
use tracing::{error, info, warn};

use crate::domain::{
    fetchers::{FetchError, PromotionFetcher},
    promotions::{PromotionsService, data::ReplaceOutcome},
    refresh::{RefreshOutcome, RefreshReport, Refresher, StoreRefresh},
    stores::Store,
};

/// Runs every configured fetcher in turn and writes successful listings.
///
/// Scheduled and request-triggered cycles may overlap. Each store's
/// fetch-and-replace runs under that store's lock, so two cycles never
/// interleave their writes for the same store.
pub struct RefreshOrchestrator {
    promotions: Arc<dyn PromotionsService>,
    fetchers: Vec<Arc<dyn PromotionFetcher>>,
    store_locks: FxHashMap<Store, Mutex<()>>,
    fetch_timeout: Duration,
}

impl RefreshOrchestrator {
    #[must_use]
    pub fn new(
        promotions: Arc<dyn PromotionsService>,
        fetchers: Vec<Arc<dyn PromotionFetcher>>,
        fetch_timeout: Duration,
    ) -> Self {
        let store_locks = fetchers
            .iter()
            .map(|fetcher| (fetcher.store(), Mutex::new(())))
            .collect();

        Self {
            promotions,
            fetchers,
            store_locks,
            fetch_timeout,
        }
    }

    /// Stores covered by this orchestrator, in refresh order.
    #[must_use]
    pub fn stores(&self) -> Vec<Store> {
        self.fetchers.iter().map(|fetcher| fetcher.store()).collect()
    }

    async fn refresh_store(&self, fetcher: &dyn PromotionFetcher) -> RefreshOutcome {
        let store = fetcher.store();

        let _guard = match self.store_locks.get(&store) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let promotions = match timeout(self.fetch_timeout, fetcher.fetch()).await {
            Ok(Ok(promotions)) => promotions,
            Ok(Err(source)) => {
                warn!(
                    event = "refresh.fetch_failed",
                    %store,
                    "failed to fetch promotions: {source}"
                );

                return RefreshOutcome::FetchFailed(source.to_string());
            }
            Err(_elapsed) => {
                let source = FetchError::TimedOut(self.fetch_timeout);

                warn!(
                    event = "refresh.fetch_failed",
                    %store,
                    "failed to fetch promotions: {source}"
                );

                return RefreshOutcome::TimedOut;
            }
        };

        let fetched = promotions.len();

        match self
            .promotions
            .replace_store_promotions(store, promotions)
            .await
        {
            Ok(ReplaceOutcome::Replaced { removed, inserted }) => {
                RefreshOutcome::Replaced { removed, inserted }
            }
            Ok(ReplaceOutcome::Skipped) => {
                warn!(
                    %store,
                    fetched,
                    "store returned no usable promotions, keeping cached snapshot"
                );

                RefreshOutcome::NothingFetched
            }
            Err(source) => {
                error!(%store, "failed to store fetched promotions: {source}");

                RefreshOutcome::StorageFailed(source.to_string())
            }
        }
    }
}

#[async_trait]
impl Refresher for RefreshOrchestrator {
    async fn run_cycle(&self) -> RefreshReport {
        let started_at = Timestamp::now();
        let started = Instant::now();

        info!(
            event = "refresh.cycle_started",
            stores = self.fetchers.len(),
            "starting promotions refresh cycle"
        );

        let mut stores = Vec::with_capacity(self.fetchers.len());

        for fetcher in &self.fetchers {
            let outcome = self.refresh_store(fetcher.as_ref()).await;

            stores.push(StoreRefresh {
                store: fetcher.store(),
                outcome,
            });
        }

        let report = RefreshReport {
            started_at,
            duration: started.elapsed(),
            stores,
        };

        info!(
            event = "refresh.cycle_finished",
            succeeded = report.succeeded(),
            failed = report.failed(),
            duration_ms = report.duration.as_millis(),
            "finished promotions refresh cycle"
        );

        report
    }
}
