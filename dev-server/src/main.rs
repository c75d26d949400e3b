//! Development server for UI work on the company setup screen
//!
//! Serves the in-memory company API stub, seeded with a few companies, so
//! the frontend can be run against it without the real backend.
//!
//! Environment variables (optionally from a .env file):
//! - PORT: port to listen on (default 8000)
//!
//! Usage: cargo run -p dev-server

use actix_web::web;
use anyhow::{Context, Result};
use test_helpers::{StubConfig, StubState, build, mock::DevDataset, telemetry};
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    // Silently ignore a missing .env file
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting company API development server");

    let stub = web::Data::new(StubState::default());
    let dataset = DevDataset::create(&stub);

    let mut config = StubConfig {
        ip: "127.0.0.1".into(),
        port,
    };
    let server = build(&mut config, stub.clone())?;
    let handle = server.handle();
    tokio::spawn(server);

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", config.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        config.port
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    handle.stop(true).await;
    Ok(())
}
