//! Larder Web Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use larder_app::context::AppContext;

use crate::{
    config::ServerConfig,
    scheduler::{RefreshScheduler, RefreshTrigger},
    state::State,
};

mod config;
mod extensions;
mod healthcheck;
mod home;
mod observability;
mod router;
mod scheduler;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Larder web server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(source) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is the only sink left"
        )]
        {
            eprintln!("Observability error: {source}");
        }

        process::exit(1);
    }

    let app_config = config.app_config();

    let app = match AppContext::from_config(&app_config).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let scheduler =
        match RefreshScheduler::start(&config.refresh.refresh_cron, app.refresher.clone()).await {
            Ok(scheduler) => Some(scheduler),
            Err(source) => {
                error!("failed to start refresh scheduler, continuing without it: {source}");

                None
            }
        };

    if config.refresh.refresh_on_startup {
        scheduler::run_refresh(RefreshTrigger::Startup, app.refresher.as_ref()).await;
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router::build(State::shared(app))).await;

    if let Some(scheduler) = scheduler
        && let Err(source) = scheduler.shutdown().await
    {
        error!("failed to stop refresh scheduler: {source}");
    }

    info!("server stopped");
}
