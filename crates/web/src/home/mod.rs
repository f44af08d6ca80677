//! Recipe form page

use larder_app::{context::AppContext, domain::freshness::Freshness};

use crate::scheduler::{RefreshTrigger, record_refresh};

mod form;
pub(crate) mod page;
pub(crate) mod show;
pub(crate) mod submit;

/// Makes sure today's cache is populated before the page reads it.
async fn ensure_fresh(app: &AppContext) {
    if let Freshness::Refreshed(report) = app.freshness.ensure_fresh().await {
        record_refresh(RefreshTrigger::OnDemand, &report);
    }
}
