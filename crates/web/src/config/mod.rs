//! Server configuration module

use clap::Parser;
use larder_app::context::AppConfig;

use crate::config::{
    db::DatabaseConfig, observability::LoggingConfig, refresh::RefreshConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod refresh;
pub(crate) mod server;

/// Larder web server configuration
#[derive(Debug, Parser)]
#[command(name = "larder-web", about = "Larder Web Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Promotion cache database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Promotion refresh settings.
    #[command(flatten)]
    pub refresh: RefreshConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for assembling the application services.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.database_max_connections,
            feeds: AppConfig::feeds_from_urls(
                self.refresh.kaufland_feed_url.clone(),
                self.refresh.lidl_feed_url.clone(),
            ),
            fetch_timeout: self.refresh.fetch_timeout(),
        }
    }
}
