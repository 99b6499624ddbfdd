//! GET /health — liveness plus a backend probe snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::health_service::HealthStatus;
use serde::Serialize;

use crate::core::app_state::AppState;

/// Response payload for /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Always true once the process serves traffic: the model load happens
    /// before the listener binds.
    pub model_loaded: bool,
    /// Tier the startup load settled on ("Primary" or "Fallback").
    pub tier: String,
    /// Live probe of the active backend endpoint.
    pub backend: HealthStatus,
    pub message: &'static str,
}

/// Handler: GET /health
///
/// The probe is resilient; an unreachable backend shows up as
/// `backend.ok = false` while the endpoint itself still answers 200.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = state.llm.health().await;

    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
        tier: format!("{:?}", state.llm.tier()),
        backend,
        message: "Luna Women's Health Chatbot API is running",
    })
}
