//! Route table and shared application state.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use triage_ai::FallbackController;

use crate::handlers;

/// State shared by all handlers. Read-only after startup.
pub struct AppState {
    pub controller: FallbackController,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(controller: FallbackController) -> Self {
        Self {
            controller,
            started_at: Utc::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/classify", post(handlers::classify))
        .route("/health", get(handlers::health))
        .with_state(state)
}
