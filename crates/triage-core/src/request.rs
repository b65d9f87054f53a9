//! Incoming classification requests.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A single classification call.
///
/// `source` and `filepath` are provenance metadata carried through for
/// logging only; nothing in the pipeline interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default)]
    pub force_local: bool,
    #[serde(default)]
    pub force_api: bool,
}

/// Which backend the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Remote backend only; failures degrade without trying local.
    Remote,
    /// Local backend only; failures degrade without trying remote.
    Local,
    /// Let process configuration pick the order.
    Auto,
}

impl ClassificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn force_local(mut self) -> Self {
        self.force_local = true;
        self
    }

    pub fn force_api(mut self) -> Self {
        self.force_api = true;
        self
    }

    /// Reject empty or whitespace-only text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }

    /// Resolve the two force flags. `force_api` takes precedence when both are set.
    pub fn intent(&self) -> Intent {
        if self.force_api {
            Intent::Remote
        } else if self.force_local {
            Intent::Local
        } else {
            Intent::Auto
        }
    }
}
