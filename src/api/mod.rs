//! HTTP API for the sentiment gateway.

pub mod analyze;
pub mod health;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(analyze::router())
}
