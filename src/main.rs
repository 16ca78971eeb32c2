use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use config::RunConfiguration;

use tokio::signal;
use tracing::{error, info, warn, Level};

use crate::api::Server;
use crate::context::Context;
use crate::hiscores::OfficialHiscores;
use crate::scrape::run_scrape;

mod api;
mod config;
mod context;
mod hiscores;
mod scrape;
mod utils;

async fn health_check() -> &'static str {
    "OK"
}

async fn serve_api(ctx: Context) -> ExitCode {
    let server = match Server::bind(ctx).await {
        Ok(server) => server,
        Err(error) => {
            error!("Failed to bind: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let handle = match server.start() {
        Ok(handle) => handle,
        Err(error) => {
            error!("Failed to start server: {}", error);
            return ExitCode::FAILURE;
        }
    };
    info!("Listening on {}", handle.local_addr());

    match signal::ctrl_c().await {
        Ok(()) => warn!("Received SIGINT, shutting down"),
        Err(error) => error!("Failed to receive SIGINT: {}", error),
    }

    if let Err(error) = handle.stop().await {
        error!("Server stopped with an error: {}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::FmtSubscriber::builder()
        .with_thread_names(true)
        .with_target(false)
        .with_max_level(
            Level::from_str(env::var("LOG_LEVEL").unwrap_or("INFO".to_string()).as_str())
                .unwrap_or(Level::DEBUG),
        )
        .compact()
        .init();

    if dotenvy::dotenv().is_err() {
        info!("No .env file loaded");
    }

    let run_configuration = RunConfiguration::parse();

    let context = Context {
        hiscores: Arc::new(OfficialHiscores::new(
            run_configuration.hiscores_url.clone(),
        )),
        config: Arc::new(run_configuration.clone()),
    };

    match run_configuration.app_component.as_str() {
        "api" => serve_api(context).await,
        "scrape" => match run_scrape(context).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                error!("Scrape failed: {}", error);
                ExitCode::FAILURE
            }
        },
        _ => {
            error!("Unknown component.");
            ExitCode::FAILURE
        }
    }
}
