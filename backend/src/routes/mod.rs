//! Route definitions for the stock advisor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product picker, creation and stock summaries
        .nest("/products", product_routes())
        // Download of the full document
        .route("/export", get(handlers::export_data))
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:name", get(handlers::get_product_summary))
        .route("/:name/sales", post(handlers::record_sale))
        .route("/:name/history", get(handlers::get_recent_history))
}
