use anyhow::Context;
use axum::{Router, routing::get};
use beacon_server::{Registry, SignalingRouter, SignalingService, ws_handler};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = match env::var("BEACON_PORT") {
        Ok(value) => value
            .parse()
            .context("BEACON_PORT is not a valid port number")?,
        Err(_) => DEFAULT_PORT,
    };

    let (router_cmd_tx, router_cmd_rx) = mpsc::channel(256);

    let service = SignalingService::new(router_cmd_tx);

    let router = SignalingRouter::new(Registry::new(), router_cmd_rx, Arc::new(service.clone()));
    tokio::spawn(router.run());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Signaling relay listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
