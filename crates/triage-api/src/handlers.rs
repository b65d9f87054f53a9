//! Request handlers for `/classify` and `/health`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use triage_core::{BackendKind, ClassificationRequest, OrchestrationOutcome};

use crate::ApiError;
use crate::router::AppState;

/// Body of a successful `/classify` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub tags: Vec<String>,
    pub summary: String,
    pub confidence: f64,
    pub model: String,
    pub fallback_used: bool,
}

impl From<OrchestrationOutcome> for ClassifyResponse {
    fn from(outcome: OrchestrationOutcome) -> Self {
        Self {
            tags: outcome.result.tags,
            summary: outcome.result.summary,
            confidence: outcome.result.confidence,
            model: outcome.model,
            fallback_used: outcome.fallback_used,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub local_configured: bool,
    pub api_configured: bool,
    pub models: Vec<String>,
    /// RFC 3339 process start time.
    pub started_at: String,
}

pub(crate) async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassificationRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let outcome = state.controller.classify(&request).await?;
    Ok(Json(outcome.into()))
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backends = state.controller.backends();
    Json(HealthResponse {
        status: "healthy".into(),
        local_configured: backends.is_configured(BackendKind::Local),
        api_configured: backends.is_configured(BackendKind::Remote),
        models: backends.models().into_iter().map(String::from).collect(),
        started_at: state.started_at.to_rfc3339(),
    })
}
