//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub products: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_warning: Option<String>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // A failed startup load leaves the server running on an empty document
    let storage = match state.load_warning {
        Some(_) => "recovered_empty".to_string(),
        None => "ok".to_string(),
    };
    let products = state.document.lock().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
        products,
        load_warning: state.load_warning.as_deref().map(str::to_string),
    })
}
