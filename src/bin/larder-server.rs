// ABOUTME: HTTP session server binary for the recipe discovery engine
// ABOUTME: Loads configuration, builds the engine and serves the session routes until Ctrl-C
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Larder Server Binary
//!
//! Serves discovery sessions over HTTP. Exits with status 1 and an explicit
//! diagnostic when `LARDER_API_KEY` is not set.

use anyhow::Result;
use clap::Parser;
use larder::{
    config::LarderConfig,
    constants::service_names,
    engine::Engine,
    logging,
    routes::{self, ServerResources},
    session::SessionRegistry,
};
use larder_providers::{initialize_shared_client, RecipeApi, SpoonacularClient};
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "larder-server")]
#[command(about = "Larder - recipe discovery session server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env(service_names::LARDER_SERVER)?;

    let mut config = match LarderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(code = ?e.code, "Configuration error: {}", e.message);
            eprintln!("larder-server: {e}");
            process::exit(1);
        }
    };

    if let Some(http_port) = args.http_port {
        config.server.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    info!("{}", config.summary());

    initialize_shared_client(
        config.upstream.timeout_secs,
        config.upstream.connect_timeout_secs,
    );
    let api: Arc<dyn RecipeApi> = Arc::new(SpoonacularClient::new(config.spoonacular_config()));
    let provider = api.name();
    let engine = Arc::new(Engine::new(api, config.engine));
    let registry = SessionRegistry::new(engine, config.server.max_sessions);
    let app = routes::router(Arc::new(ServerResources::new(registry, provider)));

    let address = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "Larder server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Larder server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
