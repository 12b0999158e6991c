use std::net::SocketAddr;
use std::sync::Arc;

use aura_relay::{config::RelayConfig, routes, state::AppState};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log_startup(&config, addr);

    let cors = CorsLayer::very_permissive();
    let app: Router = routes::create_router(&config.static_dir)
        .with_state(Arc::new(AppState::new(config)))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn log_startup(config: &RelayConfig, addr: SocketAddr) {
    tracing::info!("🌟 Aura chat relay running on http://localhost:{}", addr.port());
    tracing::info!(
        "📝 API key: {}",
        if config.has_api_key() { "✅ configured" } else { "❌ not set" }
    );
    tracing::info!("🤖 Model: {}", config.mode.model());

    if config.mode.is_custom() {
        let url: String = config.mode.url().chars().take(60).collect();
        tracing::info!("✅ Using custom inference endpoint {}...", url);
    } else {
        tracing::warn!("⚠️  Using fallback public model (router API)");
        tracing::warn!("   Set HF_ENDPOINT_URL in .env to use a dedicated inference endpoint");
    }
}
