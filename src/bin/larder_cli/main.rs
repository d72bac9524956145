// ABOUTME: Larder CLI - interactive recipe discovery in the terminal
// ABOUTME: Drives one in-process session and keeps the cart in a local JSON file between runs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Start a session with the cart stored in the platform data directory
//! larder-cli
//!
//! # Keep the cart somewhere else, or not at all
//! larder-cli --cart-path ./cart.json
//! larder-cli --no-persist
//! ```
//!
//! Inside the session:
//! ```text
//! larder> find egg
//! larder> add bread flour, eggs
//! larder> search
//! larder> skip
//! larder> save
//! larder> cart
//! ```

mod commands;
mod helpers;

use clap::Parser;
use larder::{
    config::LarderConfig,
    constants::service_names,
    engine::Engine,
    errors::AppResult,
    logging::{LogWriter, LoggingConfig},
    session::Session,
    storage::{CartStore, FileCartStore, MemoryCartStore},
};
use larder_providers::{initialize_shared_client, SpoonacularClient};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error};

use commands::{parse_line, Flow};

#[derive(Parser)]
#[command(
    name = "larder-cli",
    about = "Larder interactive recipe discovery",
    long_about = "Pick the ingredients you have, page through matching recipes and collect a priced shopping list."
)]
struct Cli {
    /// Cart file override
    #[arg(long)]
    cart_path: Option<PathBuf>,

    /// Keep the cart in memory only
    #[arg(long, conflicts_with = "cart_path")]
    no_persist: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging =
        LoggingConfig::from_env(service_names::LARDER_CLI).with_writer(LogWriter::Stderr);
    logging.level = if cli.verbose { "debug" } else { "warn" }.to_owned();
    if let Err(e) = logging.init() {
        eprintln!("larder-cli: logging setup failed: {e}");
    }

    let config = match LarderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(code = ?e.code, "Configuration error: {}", e.message);
            eprintln!("larder-cli: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        error!("Session failed: {}", e);
        eprintln!("larder-cli: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli, config: LarderConfig) -> AppResult<()> {
    debug!("{}", config.summary());

    let store: Box<dyn CartStore> = if cli.no_persist {
        Box::new(MemoryCartStore::new())
    } else {
        Box::new(FileCartStore::new(
            cli.cart_path.unwrap_or_else(|| config.cart_path.clone()),
        ))
    };

    initialize_shared_client(
        config.upstream.timeout_secs,
        config.upstream.connect_timeout_secs,
    );
    let api = Arc::new(SpoonacularClient::new(config.spoonacular_config()));
    let engine = Arc::new(Engine::new(api, config.engine));
    let mut session = Session::new(engine, store.load().await?);

    helpers::display::print_banner(session.cart().len());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"larder> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if commands::execute(&mut session, store.as_ref(), command).await == Flow::Quit {
            break;
        }
    }

    Ok(())
}
