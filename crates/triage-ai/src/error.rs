use std::time::Duration;

use thiserror::Error;
use triage_core::{BackendKind, ValidationError};

/// Backend output that could not be decoded as a classification object.
#[derive(Debug, Error)]
#[error("failed to parse JSON: {source}")]
pub struct MalformedResponse {
    #[source]
    pub source: serde_json::Error,
}

/// A single backend invocation failed. The controller absorbs all of these.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0} backend not configured")]
    Unavailable(BackendKind),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("unexpected response envelope: {0}")]
    Envelope(String),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

/// Failures surfaced to the caller of [`FallbackController::classify`](crate::FallbackController::classify).
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No classification backend configured")]
    NoBackendConfigured,
}
