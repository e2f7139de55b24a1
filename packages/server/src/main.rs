use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use common::payment::LocalGateway;
use common::store::MemoryStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    // The store handle is built here and passed through state; nothing else
    // holds authoritative data.
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(LocalGateway::new());
    let state = AppState::new(store, gateway, config.clone());

    let app = server::build_router(state);

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
