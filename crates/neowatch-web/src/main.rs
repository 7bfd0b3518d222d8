//! NeoWatch API server
//!
//! Run with: cargo run -p neowatch-web

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use neowatch_web::config::Config;
use neowatch_web::router::build_router;
use neowatch_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("neowatch=debug,info")),
        )
        .init();

    let config = Config::load()?;
    let bind_addr = config.bind_addr.clone();
    info!(service = %config.service_name, neows = %config.neows_base_url, "Starting NeoWatch API");

    let state = AppState::from_config(config).context("failed to initialise application state")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
