//! Backend selection, confidence-gated escalation, and degradation.
//!
//! Policy, in priority order:
//!
//! 1. `force_api`: remote only. Any failure degrades; local is never tried.
//! 2. `force_local`: local only. Any failure degrades; remote is never tried.
//! 3. Local-first and a local backend exists: call local. Keep it when
//!    confidence ≥ [`ESCALATION_THRESHOLD`]. Otherwise, or on failure, call
//!    remote if one exists. A local failure with no remote degrades.
//! 4. A remote backend exists: call it.
//! 5. Nothing configured: [`ClassifyError::NoBackendConfigured`].
//!
//! Every backend failure in 1–4 becomes the heuristic result with
//! `fallback_used = true`. Calls are strictly sequential.

use std::time::Duration;

use tracing::{info, warn};
use triage_core::{
    BackendInvocation, BackendKind, ClassificationRequest, ClassifierConfig, Intent,
    OrchestrationOutcome,
};

use crate::{BackendError, BackendRegistry, ClassifyError, heuristic_classification};

/// Local results below this confidence are escalated to the remote backend.
pub const ESCALATION_THRESHOLD: f64 = 0.7;

/// Why no backend result could be produced.
#[derive(Debug)]
enum AttemptError {
    /// Nothing configured on the un-forced path; surfaced to the caller.
    NoBackend,
    /// A backend call failed; absorbed into the heuristic result.
    Backend(BackendKind, BackendError),
}

impl AttemptError {
    fn backend(kind: BackendKind) -> impl FnOnce(BackendError) -> Self {
        move |err| Self::Backend(kind, err)
    }
}

/// Decides which backends to call for a request and always settles on an answer.
#[derive(Debug, Clone)]
pub struct FallbackController {
    backends: BackendRegistry,
    local_first: bool,
    request_timeout: Duration,
}

impl FallbackController {
    pub fn new(backends: BackendRegistry, local_first: bool, request_timeout: Duration) -> Self {
        Self {
            backends,
            local_first,
            request_timeout,
        }
    }

    /// Build the registry from `config` and wrap it in a controller.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, BackendError> {
        let backends = BackendRegistry::from_config(config)?;
        Ok(Self::new(
            backends,
            config.local_first,
            config.request_timeout,
        ))
    }

    pub fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    /// Classify `request.text`.
    ///
    /// Errors only on blank text or when no backend is configured for the
    /// un-forced path. Backend failures of any kind yield the heuristic result.
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<OrchestrationOutcome, ClassifyError> {
        request.validate()?;

        let intent = request.intent();
        info!(
            ?intent,
            source = request.source.as_deref().unwrap_or("-"),
            filepath = request.filepath.as_deref().unwrap_or("-"),
            chars = request.text.chars().count(),
            "classifying"
        );

        match self.attempt(intent, &request.text).await {
            Ok(outcome) => {
                info!(
                    model = %outcome.model,
                    confidence = outcome.result.confidence,
                    fallback_used = outcome.fallback_used,
                    "classification complete"
                );
                Ok(outcome)
            }
            Err(AttemptError::NoBackend) => {
                warn!("no classification backend configured");
                Err(ClassifyError::NoBackendConfigured)
            }
            Err(AttemptError::Backend(kind, err)) => {
                warn!(backend = %kind, error = %err, "backend failed, using heuristic result");
                Ok(OrchestrationOutcome::heuristic(heuristic_classification(
                    &request.text,
                )))
            }
        }
    }

    async fn attempt(
        &self,
        intent: Intent,
        text: &str,
    ) -> Result<OrchestrationOutcome, AttemptError> {
        match intent {
            Intent::Remote => self.single(BackendKind::Remote, text).await,
            Intent::Local => self.single(BackendKind::Local, text).await,
            Intent::Auto if self.local_first && self.backends.is_configured(BackendKind::Local) => {
                self.local_then_remote(text).await
            }
            Intent::Auto if self.backends.is_configured(BackendKind::Remote) => {
                self.single(BackendKind::Remote, text).await
            }
            Intent::Auto => Err(AttemptError::NoBackend),
        }
    }

    async fn single(
        &self,
        kind: BackendKind,
        text: &str,
    ) -> Result<OrchestrationOutcome, AttemptError> {
        let invocation = self
            .invoke(kind, text)
            .await
            .map_err(AttemptError::backend(kind))?;
        Ok(OrchestrationOutcome::from_backend(kind, invocation, false))
    }

    async fn local_then_remote(&self, text: &str) -> Result<OrchestrationOutcome, AttemptError> {
        let has_remote = self.backends.is_configured(BackendKind::Remote);

        match self.invoke(BackendKind::Local, text).await {
            Ok(local) if local.result.confidence >= ESCALATION_THRESHOLD || !has_remote => Ok(
                OrchestrationOutcome::from_backend(BackendKind::Local, local, false),
            ),
            Ok(local) => {
                info!(
                    model = %local.model,
                    confidence = local.result.confidence,
                    threshold = ESCALATION_THRESHOLD,
                    "local confidence below threshold, escalating to remote"
                );
                self.escalate(text).await
            }
            Err(err) if has_remote => {
                warn!(error = %err, "local backend failed, falling back to remote");
                self.escalate(text).await
            }
            Err(err) => Err(AttemptError::Backend(BackendKind::Local, err)),
        }
    }

    async fn escalate(&self, text: &str) -> Result<OrchestrationOutcome, AttemptError> {
        let invocation = self
            .invoke(BackendKind::Remote, text)
            .await
            .map_err(AttemptError::backend(BackendKind::Remote))?;
        Ok(OrchestrationOutcome::from_backend(
            BackendKind::Remote,
            invocation,
            true,
        ))
    }

    /// One bounded call. No retry.
    async fn invoke(&self, kind: BackendKind, text: &str) -> Result<BackendInvocation, BackendError> {
        let backend = self.backends.require(kind)?;
        match tokio::time::timeout(self.request_timeout, backend.classify(text)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.request_timeout)),
        }
    }
}
