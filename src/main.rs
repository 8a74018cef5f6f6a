use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use parking_booking::config::AppConfig;
use parking_booking::handlers;
use parking_booking::models::SlotCatalog;
use parking_booking::services::notifier::LogNotifier;
use parking_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let catalog = SlotCatalog::load(config.catalog_path.as_deref())?;
    match config.catalog_path.as_deref() {
        Some(path) => tracing::info!("loaded slot catalog from {path}"),
        None => tracing::info!("using built-in slot catalog"),
    }
    tracing::info!(
        "{} slots, {} available",
        catalog.slots().len(),
        catalog.available_count()
    );

    tracing::info!(
        "booking sessions expire after {} idle minutes",
        config.session_idle_minutes
    );

    let state = Arc::new(AppState::new(config.clone(), catalog, Box::new(LogNotifier)));

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
