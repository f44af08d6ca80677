use std::time::Duration;

use clap::Args;
use larder_app::{
    context::{AppConfig, AppContext},
    domain::refresh::RefreshOutcome,
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RefreshArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Kaufland promotion feed URL
    #[arg(long, env = "KAUFLAND_FEED_URL")]
    kaufland_feed_url: Option<String>,

    /// Lidl promotion feed URL
    #[arg(long, env = "LIDL_FEED_URL")]
    lidl_feed_url: Option<String>,

    /// Seconds to wait for each store's feed
    #[arg(long, env = "FETCH_TIMEOUT_SECONDS", default_value_t = 30)]
    fetch_timeout_seconds: u64,
}

pub(crate) async fn run(args: RefreshArgs) -> Result<(), String> {
    let config = AppConfig {
        database_url: args.database.database_url,
        max_connections: args.database.database_max_connections,
        feeds: AppConfig::feeds_from_urls(args.kaufland_feed_url, args.lidl_feed_url),
        fetch_timeout: Duration::from_secs(args.fetch_timeout_seconds),
    };

    if config.feeds.is_empty() {
        return Err("no store feeds configured".to_string());
    }

    let context = AppContext::from_config(&config)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let report = context.refresher.run_cycle().await;

    for entry in &report.stores {
        match &entry.outcome {
            RefreshOutcome::Replaced { removed, inserted } => {
                println!("{}: replaced {removed} with {inserted}", entry.store);
            }
            RefreshOutcome::FetchFailed(reason) | RefreshOutcome::StorageFailed(reason) => {
                println!("{}: {} ({reason})", entry.store, entry.outcome.as_str());
            }
            outcome => println!("{}: {}", entry.store, outcome.as_str()),
        }
    }

    println!(
        "finished in {}ms, {} succeeded, {} failed",
        report.duration.as_millis(),
        report.succeeded(),
        report.failed()
    );

    if report.succeeded() == 0 && report.failed() > 0 {
        return Err("no store refreshed successfully".to_string());
    }

    Ok(())
}
