use crate::{AppState, routes::create_router};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn create_app(state: AppState) -> Router {
    create_router(state).layer(TraceLayer::new_for_http())
}

/// Serves the admin API until `shutdown` is cancelled.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Admin server listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Admin server stopped");
    Ok(())
}
