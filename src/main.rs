mod api;
mod cli;
mod config;
mod error;
mod model;
mod service;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use api::AppState;
use cli::Args;
use config::ServerConfig;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load(Args::parse())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    info!("hop-trace starting");
    info!(
        "Config: geo_api={}, lookup_timeout={}ms, trace_timeout={}s, max_hops={:?}, traceroute_bin={:?}",
        config.geo_api_url,
        config.lookup_timeout.as_millis(),
        config.trace_timeout.as_secs(),
        config.max_hops,
        config.traceroute_bin
    );

    let state = web::Data::new(AppState::from_config(&config));
    let (host, port) = config.bind_addr();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    info!("HTTP server listening on {}:{}", host, port);
    server.run().await.context("HTTP server error")?;

    Ok(())
}
