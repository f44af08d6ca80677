//! Refresh Reports

use std::time::Duration;

use jiff::Timestamp;

use crate::domain::stores::Store;

/// What happened to one store during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Today's snapshot was written.
    Replaced { removed: u64, inserted: u64 },

    /// The fetcher succeeded but produced nothing usable; prior data kept.
    NothingFetched,

    /// The fetcher failed; prior data kept.
    FetchFailed(String),

    /// The fetcher did not finish within the configured timeout; prior data kept.
    TimedOut,

    /// Writing the snapshot failed and was rolled back; prior data kept.
    StorageFailed(String),
}

impl RefreshOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed(_) | Self::TimedOut | Self::StorageFailed(_)
        )
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Replaced { .. } => "replaced",
            Self::NothingFetched => "nothing_fetched",
            Self::FetchFailed(_) => "fetch_failed",
            Self::TimedOut => "timed_out",
            Self::StorageFailed(_) => "storage_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRefresh {
    pub store: Store,
    pub outcome: RefreshOutcome,
}

/// Summary of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub started_at: Timestamp,
    pub duration: Duration,
    pub stores: Vec<StoreRefresh>,
}

impl RefreshReport {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.stores.iter().filter(|s| s.outcome.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.stores.iter().filter(|s| s.outcome.is_failure()).count()
    }

    #[must_use]
    pub fn outcome_for(&self, store: Store) -> Option<&RefreshOutcome> {
        self.stores
            .iter()
            .find(|s| s.store == store)
            .map(|s| &s.outcome)
    }
}
