//! Sentiment gateway - forwards text to a remote classifier and returns a
//! normalized sentiment verdict.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentiment_gateway::{api, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sentiment gateway");
    tracing::info!("Classifier endpoint: {}", config.classifier.url);
    if config.classifier.api_token.is_none() {
        tracing::warn!("No classifier API token configured; upstream requests may be rejected");
    }

    let addr = format!("{}:{}", config.api.host, config.api.port);
    let state = Arc::new(AppState::new(config));

    // Build router
    let app = Router::new()
        .merge(api::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
