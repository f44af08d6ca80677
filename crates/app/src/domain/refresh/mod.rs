//! Promotions Refresh

use async_trait::async_trait;
use mockall::automock;

mod orchestrator;
mod report;

pub use orchestrator::RefreshOrchestrator;
pub use report::{RefreshOutcome, RefreshReport, StoreRefresh};

#[automock]
#[async_trait]
pub trait Refresher: Send + Sync {
    /// Runs one full refresh cycle across every configured store.
    ///
    /// Never fails: per-store problems are recorded in the report.
    async fn run_cycle(&self) -> RefreshReport;
}
