use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use telemetry_store::build_router;
use telemetry_store::config::StoreConfig;
use telemetry_store::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("telemetry_store=debug,tower_http=debug")
        }))
        .init();

    let config = StoreConfig::load("telemetry_store.toml")?.apply_env();

    let state = Arc::new(Store::new());
    let app = build_router(state);

    let host: std::net::IpAddr = config.server.host.parse().unwrap_or_else(|_| [0, 0, 0, 0].into());
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("telemetry-store listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
