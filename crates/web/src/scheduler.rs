//! Daily promotions refresh scheduling.

use std::{fmt, sync::Arc};

use chrono::Local;
use larder_app::domain::refresh::{RefreshReport, Refresher};
use thiserror::Error;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{info, warn};

use crate::observability::observe_refresh;

#[derive(Debug, Error)]
pub(crate) enum SchedulerError {
    #[error("invalid refresh schedule {cron:?}: {source}")]
    InvalidSchedule {
        cron: String,
        #[source]
        source: JobSchedulerError,
    },

    #[error("refresh scheduler failed: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

/// What started a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshTrigger {
    Scheduled,
    Startup,
    OnDemand,
}

impl RefreshTrigger {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Startup => "startup",
            Self::OnDemand => "on_demand",
        }
    }
}

/// Logs a finished cycle and feeds the refresh metrics.
pub(crate) fn record_refresh(trigger: RefreshTrigger, report: &RefreshReport) {
    observe_refresh(trigger.as_str(), report);

    for entry in report.stores.iter().filter(|entry| entry.outcome.is_failure()) {
        warn!(
            trigger = trigger.as_str(),
            store = %entry.store,
            outcome = entry.outcome.as_str(),
            "store refresh did not complete"
        );
    }

    info!(
        trigger = trigger.as_str(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        duration_ms = report.duration.as_millis(),
        "promotions refresh recorded"
    );
}

/// Runs one cycle now and records it.
pub(crate) async fn run_refresh(
    trigger: RefreshTrigger,
    refresher: &dyn Refresher,
) -> RefreshReport {
    let report = refresher.run_cycle().await;

    record_refresh(trigger, &report);

    report
}

/// Cron-driven refresh job running on the local time zone.
pub(crate) struct RefreshScheduler {
    scheduler: JobScheduler,
}

impl fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshScheduler").finish_non_exhaustive()
    }
}

impl RefreshScheduler {
    /// Registers the refresh job on `cron` and starts ticking.
    pub(crate) async fn start(
        cron: &str,
        refresher: Arc<dyn Refresher>,
    ) -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;

        let job = Job::new_async_tz(cron, Local, move |_uuid, _scheduler| {
            let refresher = refresher.clone();

            Box::pin(async move {
                run_refresh(RefreshTrigger::Scheduled, refresher.as_ref()).await;
            })
        })
        .map_err(|source| SchedulerError::InvalidSchedule {
            cron: cron.to_string(),
            source,
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!(cron, "promotions refresh scheduled");

        Ok(Self { scheduler })
    }

    pub(crate) async fn shutdown(mut self) -> Result<(), SchedulerError> {
        self.scheduler.shutdown().await?;

        info!("promotions refresh scheduler stopped");

        Ok(())
    }
}
