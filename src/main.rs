mod api;
mod config;
mod db;
mod error;
mod export;
mod fetcher;
mod normalizer;
mod types;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::db::store::MatchStore;
use crate::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let store = MatchStore::connect(&cfg.db_path).await?;
    info!("Database ready at {}", cfg.db_path);

    if cfg.api_football_key.is_none() {
        warn!("API_FOOTBALL_KEY not set — POST /fetch will fail until it is configured; POST /sample works offline");
    }

    let state = ApiState {
        store,
        cfg: cfg.clone(),
    };
    let app = router(state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
