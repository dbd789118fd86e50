//! Minimal web UI over a loaded archive.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML page with a filter form |
//! | `GET /posts?keyword&start_date&end_date&page` | `{posts, total, page}`, 50 per page |
//! | `GET /export?keyword&start_date&end_date` | CSV attachment |
//! | `GET /health` | status and load counters |
//!
//! The archive is shared read-only through an [`Arc`]; the server runs on a
//! current-thread runtime and shuts down on Ctrl+C or SIGTERM.

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::archive::Archive;

pub use error::WebError;

/// Default port of the web UI.
pub const DEFAULT_PORT: u16 = 5897;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5897)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration bound to `bind_addr`.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }
}

/// Builds the router over a shared archive.
pub fn build_router(archive: Arc<Archive>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/posts", get(routes::posts))
        .route("/export", get(routes::export))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(archive)
}

/// Serves the web UI until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(archive: Arc<Archive>, config: ServerConfig) -> std::io::Result<()> {
    let app = build_router(archive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Runs [`serve`] on a new current-thread runtime, blocking the caller.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built or [`serve`] fails.
pub fn run_blocking(archive: Arc<Archive>, config: ServerConfig) -> std::io::Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(serve(archive, config))
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        () = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}
