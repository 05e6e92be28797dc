mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::RelayConfig;
use crate::routes::api_routes;
use crate::state::RelayState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = RelayConfig::load()?;
    info!(
        port = config.port,
        token_configured = config.api_token.is_some(),
        "starting relay"
    );

    let app = api_routes().with_state(Arc::new(RelayState::new(config.clone())));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
