//! App Context

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use thiserror::Error;
use tracing::{error, warn};

use crate::{
    database::{self, Db},
    domain::{
        fetchers::{HttpPromotionFetcher, PromotionFetcher, StoreFeed},
        freshness::FreshnessGate,
        promotions::{PromotionsService, SqlitePromotionsService},
        recipes::{PromotionRecipesService, RecipesService},
        refresh::{RefreshOrchestrator, Refresher},
        stores::Store,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Settings needed to assemble the application services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,

    /// Feed per store, in refresh order.
    pub feeds: Vec<StoreFeed>,

    pub fetch_timeout: Duration,
}

impl AppConfig {
    /// Collects configured feeds in [`Store::ALL`] order, warning about
    /// stores that have no URL.
    #[must_use]
    pub fn feeds_from_urls(kaufland: Option<String>, lidl: Option<String>) -> Vec<StoreFeed> {
        Store::ALL
            .into_iter()
            .zip([kaufland, lidl])
            .filter_map(|(store, url)| match url.filter(|url| !url.trim().is_empty()) {
                Some(url) => Some(StoreFeed { store, url }),
                None => {
                    warn!(%store, "no feed URL configured, store will not be refreshed");

                    None
                }
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub promotions: Arc<dyn PromotionsService>,
    pub refresher: Arc<dyn Refresher>,
    pub freshness: Arc<FreshnessGate>,
    pub recipes: Arc<dyn RecipesService>,
}

impl AppContext {
    /// Wire services together; the freshness gate shares `promotions` and
    /// `refresher`.
    #[must_use]
    pub fn new(
        promotions: Arc<dyn PromotionsService>,
        refresher: Arc<dyn Refresher>,
        recipes: Arc<dyn RecipesService>,
    ) -> Self {
        let freshness = Arc::new(FreshnessGate::new(promotions.clone(), refresher.clone()));

        Self {
            promotions,
            refresher,
            freshness,
            recipes,
        }
    }

    /// Build the context around an existing store and set of fetchers.
    #[must_use]
    pub fn from_parts(
        promotions: Arc<dyn PromotionsService>,
        fetchers: Vec<Arc<dyn PromotionFetcher>>,
        fetch_timeout: Duration,
    ) -> Self {
        let refresher = Arc::new(RefreshOrchestrator::new(
            promotions.clone(),
            fetchers,
            fetch_timeout,
        ));

        Self::new(promotions, refresher, Arc::new(PromotionRecipesService::new()))
    }

    /// Build application context from configuration.
    ///
    /// A failure to create the schema is logged and left for the first
    /// refresh or read to surface.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or building
    /// the HTTP client fails.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url, config.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let promotions = Arc::new(SqlitePromotionsService::new(Db::new(pool)));

        if let Err(source) = promotions.ensure_schema().await {
            error!("failed to ensure promotions schema: {source}");
        }

        let http = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(AppInitError::HttpClient)?;

        let fetchers = config
            .feeds
            .iter()
            .cloned()
            .map(|feed| {
                Arc::new(HttpPromotionFetcher::new(feed, http.clone())) as Arc<dyn PromotionFetcher>
            })
            .collect();

        Ok(Self::from_parts(promotions, fetchers, config.fetch_timeout))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::domain::freshness::Freshness;

    use super::*;

    #[test]
    fn feeds_follow_store_order_and_skip_missing_urls() {
        let feeds = AppConfig::feeds_from_urls(None, Some("http://lidl.test/feed".to_string()));

        assert_eq!(
            feeds,
            vec![StoreFeed {
                store: Store::Lidl,
                url: "http://lidl.test/feed".to_string(),
            }]
        );

        assert!(AppConfig::feeds_from_urls(Some("  ".to_string()), None).is_empty());
    }

    #[tokio::test]
    async fn from_config_creates_database_and_schema() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("context.db");

        let context = AppContext::from_config(&AppConfig {
            database_url: format!("sqlite://{}", path.display()),
            max_connections: 2,
            feeds: vec![],
            fetch_timeout: Duration::from_secs(1),
        })
        .await?;

        assert!(path.exists());
        assert!(context.promotions.read_promotions(vec![]).await?.is_empty());

        let report = context.refresher.run_cycle().await;

        assert!(report.stores.is_empty());
        assert!(matches!(
            context.freshness.ensure_fresh().await,
            Freshness::Refreshed(_)
        ));

        Ok(())
    }
}
