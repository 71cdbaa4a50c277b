//! Stock Advisor - Backend Server
//!
//! Records daily sales per product and suggests an optimal stock level and
//! reorder point from a trailing sales average.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::Document;
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use services::store::JsonFileStore;

/// Application state shared across handlers.
///
/// The selected product travels in each request path, so the only state kept
/// between requests is the document itself.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: JsonFileStore,
    pub document: Arc<Mutex<Document>>,
    /// Why the startup load fell back to an empty document, if it did
    pub load_warning: Option<Arc<str>>,
}

impl AppState {
    /// Build the state, loading the persisted document.
    ///
    /// Load failures are not fatal; they are kept as `load_warning`.
    pub async fn load(config: Config) -> Self {
        let store = JsonFileStore::new(
            config.storage.data_file.clone(),
            config.stock.history_retention_days,
        );
        let outcome = store.load().await;

        Self {
            config: Arc::new(config),
            store,
            document: Arc::new(Mutex::new(outcome.document)),
            load_warning: outcome.warning.map(|err| Arc::from(err.to_string())),
        }
    }
}

/// Today's date on the local calendar
pub fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stock Advisor API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
