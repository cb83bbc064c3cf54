//! Referee scheduling HTTP server.
//!
//! Builds an in-memory repository, optionally loads a seed file, and serves
//! the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin referee-server
//!
//! # With an explicit config file and fixtures
//! REFEREE_CONFIG=backend/referee-server.toml SEED_PATH=fixtures/league.json \
//!   cargo run --bin referee-server
//! ```
//!
//! # Environment Variables
//!
//! - `REFEREE_CONFIG`: TOML config path (default: `referee-server.toml` if present)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SEED_PATH`: JSON fixture file to load at startup
//! - `RUST_LOG`: Log filter (default: info)

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use referee_backend::config::ServerConfig;
use referee_backend::db::{apply_seed, FullRepository, LocalRepository, SeedData};
use referee_backend::http::{create_router_with_limit, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting referee scheduling server");

    let config = ServerConfig::load()?;
    let addr = config.bind_addr()?;

    let repo = LocalRepository::new();
    if let Some(path) = &config.seed.path {
        info!("Loading seed data from {}", path.display());
        let data = SeedData::from_file(path)?;
        let summary = apply_seed(&repo, &data).await?;
        info!(
            "Seeded {} referees, {} windows, {} games",
            summary.referees, summary.windows, summary.games
        );
    }

    let repository: Arc<dyn FullRepository> = Arc::new(repo);
    let state = AppState::new(repository);
    let app = create_router_with_limit(state, config.server.body_limit_bytes);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
