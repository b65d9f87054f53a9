//! The set of backends configured for this process.

use std::sync::Arc;

use triage_core::{BackendKind, ClassifierConfig};

use crate::{BackendError, ClassifierBackend, LocalBackend, RemoteBackend};

/// Backends built once at startup and shared read-only by every request.
///
/// An empty slot means that backend is disabled for the process lifetime.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    local: Option<Arc<dyn ClassifierBackend>>,
    remote: Option<Arc<dyn ClassifierBackend>>,
}

impl BackendRegistry {
    /// Build HTTP backends for whichever endpoints `config` declares.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, BackendError> {
        let local = match &config.local {
            Some(endpoint) => Some(Arc::new(LocalBackend::new(
                endpoint.clone(),
                config.request_timeout,
            )?) as Arc<dyn ClassifierBackend>),
            None => None,
        };
        let remote = match &config.remote {
            Some(endpoint) => Some(Arc::new(RemoteBackend::new(
                endpoint.clone(),
                config.request_timeout,
            )?) as Arc<dyn ClassifierBackend>),
            None => None,
        };
        Ok(Self { local, remote })
    }

    pub fn with_local(mut self, backend: Arc<dyn ClassifierBackend>) -> Self {
        self.local = Some(backend);
        self
    }

    pub fn with_remote(mut self, backend: Arc<dyn ClassifierBackend>) -> Self {
        self.remote = Some(backend);
        self
    }

    pub fn get(&self, kind: BackendKind) -> Option<&Arc<dyn ClassifierBackend>> {
        match kind {
            BackendKind::Local => self.local.as_ref(),
            BackendKind::Remote => self.remote.as_ref(),
        }
    }

    /// Like [`get`](Self::get), but an empty slot is [`BackendError::Unavailable`].
    pub fn require(&self, kind: BackendKind) -> Result<&Arc<dyn ClassifierBackend>, BackendError> {
        self.get(kind).ok_or(BackendError::Unavailable(kind))
    }

    pub fn is_configured(&self, kind: BackendKind) -> bool {
        self.get(kind).is_some()
    }

    /// Model identifiers of configured backends, local first.
    pub fn models(&self) -> Vec<&str> {
        [BackendKind::Local, BackendKind::Remote]
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|b| b.model()))
            .collect()
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("local", &self.local.as_ref().map(|b| b.model().to_owned()))
            .field("remote", &self.remote.as_ref().map(|b| b.model().to_owned()))
            .finish()
    }
}
