//! Refresh Config

use std::time::Duration;

use clap::Args;

/// Promotion refresh settings.
#[derive(Debug, Args)]
pub struct RefreshConfig {
    /// Cron expression (with seconds) for the daily refresh, local time
    #[arg(long, env = "REFRESH_CRON", default_value = "0 0 3 * * *")]
    pub refresh_cron: String,

    /// Run one refresh cycle before serving requests
    #[arg(
        long,
        env = "REFRESH_ON_STARTUP",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub refresh_on_startup: bool,

    /// Seconds to wait for each store's feed
    #[arg(long, env = "FETCH_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub fetch_timeout_seconds: u64,

    /// Kaufland promotion feed URL
    #[arg(long, env = "KAUFLAND_FEED_URL")]
    pub kaufland_feed_url: Option<String>,

    /// Lidl promotion feed URL
    #[arg(long, env = "LIDL_FEED_URL")]
    pub lidl_feed_url: Option<String>,
}

impl RefreshConfig {
    /// Per-store fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}
