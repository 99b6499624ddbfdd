//! GET / — static service metadata.

use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Luna Women's Health Chatbot API 🌸",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chat": "/chat",
            "health": "/health",
        },
    }))
}
