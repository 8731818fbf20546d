mod cli;
mod config;
mod content;
mod enrichment;
mod errors;
mod generation;
mod models;
mod render;
mod routes;
mod state;
mod versions;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first; command-line directories win over env
    let config = Config::from_env()?.with_dirs(cli.content_dir.clone(), cli.output_dir.clone());

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Serve => serve(config).await,
        command => cli::run(&command, &config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting cvgen API v{}", env!("CARGO_PKG_VERSION"));

    // Content and registry are loaded once; every request derives from this snapshot
    let state = AppState::from_config(config.clone()).context("Failed to initialise state")?;
    info!(
        "Serving {} versions from {}",
        state.assembler.registry().profiles().len(),
        config.content_dir.display()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
