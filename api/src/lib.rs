//! HTTP boundary for the chat service.
//!
//! Three routes: `POST /chat` (the pipeline), `GET /health` (liveness plus a
//! backend probe), and `GET /` (static metadata). The generation service is
//! constructed by the binary *before* [`start`] is called, so every route
//! that depends on the model only exists once the model is loaded.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use llm_service::service::LlmService;
use tokio::signal;
use tracing::info;

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use crate::core::app_state::AppState;
use crate::routes::{chat::chat_route::chat, health_route::health, root_route::service_info};

/// Binds the listener and serves until ctrl-c.
///
/// The bind address comes from `API_ADDRESS` (default `0.0.0.0:8000`).
pub async fn start(llm: Arc<LlmService>) -> Result<(), AppError> {
    let host_url = std::env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let state = Arc::new(AppState::new(llm));

    let app = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "HTTP surface listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
