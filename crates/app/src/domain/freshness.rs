//! Cache Freshness Gate

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    promotions::PromotionsService,
    refresh::{RefreshReport, Refresher},
};

/// Result of [`FreshnessGate::ensure_fresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// Today's cache already held promotions.
    Fresh,

    /// The cache was empty and a refresh cycle ran.
    Refreshed(RefreshReport),
}

/// Triggers a refresh when nothing is cached for today.
///
/// Concurrent callers that all observe an empty cache trigger a single
/// cycle; the rest wait for it and then re-check.
pub struct FreshnessGate {
    promotions: Arc<dyn PromotionsService>,
    refresher: Arc<dyn Refresher>,
    refresh_lock: Mutex<()>,
}

impl FreshnessGate {
    #[must_use]
    pub fn new(promotions: Arc<dyn PromotionsService>, refresher: Arc<dyn Refresher>) -> Self {
        Self {
            promotions,
            refresher,
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn ensure_fresh(&self) -> Freshness {
        if self.has_todays_promotions().await {
            return Freshness::Fresh;
        }

        let _guard = self.refresh_lock.lock().await;

        if self.has_todays_promotions().await {
            return Freshness::Fresh;
        }

        info!(
            event = "freshness.cache_empty",
            "cache empty, forcing refresh"
        );

        Freshness::Refreshed(self.refresher.run_cycle().await)
    }

    async fn has_todays_promotions(&self) -> bool {
        match self.promotions.read_promotions(vec![]).await {
            Ok(promotions) => !promotions.is_empty(),
            Err(error) => {
                warn!("failed to read cached promotions, treating cache as empty: {error}");

                false
            }
        }
    }
}
