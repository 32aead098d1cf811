//! Axum HTTP server.
//!
//! Serves the HTML page, the form endpoint, and the JSON API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::header,
    routing::{get, post},
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::Analyzer;
use crate::error::ServerError;
use crate::web::handlers::{
    analyze_form_handler, api_analyze_handler, health_handler, history_handler, home_handler,
};

/// Shared state for all handlers.
pub struct AppState {
    pub analyzer: Analyzer,
    /// Transport-level body cap; `None` means unlimited.
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            max_body_bytes: None,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: Option<usize>) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Build the application router.
pub fn routes(state: Arc<AppState>) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(home_handler))
        .route("/analyze", post(analyze_form_handler))
        .route("/api/analyze", post(api_analyze_handler))
        .route("/api/history", get(history_handler))
        .route("/api/health", get(health_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

/// Handle to a running server.
pub struct ServerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!("Server task panicked: {}", e);
        }
    }
}

/// Start the HTTP server in a background task.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<(SocketAddr, ServerHandle), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::StartupFailed {
            reason: format!("Failed to bind to {}: {}", addr, e),
        })?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| ServerError::StartupFailed {
            reason: format!("Failed to get local addr: {}", e),
        })?;

    let app = routes(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("HTTP server shutting down");
            })
            .await
        {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tracing::info!(addr = %bound_addr, "HTTP server listening");
    Ok((bound_addr, ServerHandle { shutdown_tx, task }))
}
