//! Stock Advisor - Backend Server binary

use std::net::SocketAddr;

use stock_advisor_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stock_server=debug,stock_advisor_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Stock Advisor Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Policy: window={}d lead_time={}d safety={}d retention={}d",
        config.stock.average_window_days,
        config.stock.lead_time_days,
        config.stock.safety_days,
        config.stock.history_retention_days
    );

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Load the persisted document
    let state = AppState::load(config).await;
    if let Some(warning) = &state.load_warning {
        tracing::warn!("Continuing with empty data: {}", warning);
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
