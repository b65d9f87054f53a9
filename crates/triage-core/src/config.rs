//! Process-wide backend configuration.
//!
//! Read once at startup and shared read-only afterwards. An empty local base
//! URL or an empty remote API key disables that backend for the lifetime of
//! the process.

use std::time::Duration;

pub const DEFAULT_LOCAL_MODEL: &str = "Qwen/Qwen2.5-14B-Instruct-AWQ";
pub const DEFAULT_REMOTE_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Self-hosted OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEndpoint {
    /// Base URL including the API prefix, e.g. `http://vllm:8000/v1`.
    pub base_url: String,
    pub model: String,
}

/// Hosted provider endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for RemoteEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEndpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("model", &self.model)
            .finish()
    }
}

/// Which backends exist and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub local: Option<LocalEndpoint>,
    pub remote: Option<RemoteEndpoint>,
    /// Try the local backend before the remote one on un-forced requests.
    pub local_first: bool,
    /// Upper bound on each backend call.
    pub request_timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            local: None,
            remote: None,
            local_first: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClassifierConfig {
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    pub fn local_configured(&self) -> bool {
        self.local.is_some()
    }

    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }
}

/// Builds a [`ClassifierConfig`] from raw (possibly empty) settings.
#[derive(Debug, Default)]
pub struct ClassifierConfigBuilder {
    local_base_url: Option<String>,
    local_model: Option<String>,
    remote_api_key: Option<String>,
    remote_base_url: Option<String>,
    remote_model: Option<String>,
    local_first: Option<bool>,
    request_timeout: Option<Duration>,
}

impl ClassifierConfigBuilder {
    pub fn local_base_url(mut self, url: impl Into<String>) -> Self {
        self.local_base_url = Some(url.into());
        self
    }

    pub fn local_model(mut self, model: impl Into<String>) -> Self {
        self.local_model = Some(model.into());
        self
    }

    pub fn remote_api_key(mut self, key: impl Into<String>) -> Self {
        self.remote_api_key = Some(key.into());
        self
    }

    pub fn remote_base_url(mut self, url: impl Into<String>) -> Self {
        self.remote_base_url = Some(url.into());
        self
    }

    pub fn remote_model(mut self, model: impl Into<String>) -> Self {
        self.remote_model = Some(model.into());
        self
    }

    pub fn local_first(mut self, local_first: bool) -> Self {
        self.local_first = Some(local_first);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ClassifierConfig {
        let local = non_empty(self.local_base_url).map(|base_url| LocalEndpoint {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: non_empty(self.local_model).unwrap_or_else(|| DEFAULT_LOCAL_MODEL.into()),
        });

        let remote = non_empty(self.remote_api_key).map(|api_key| RemoteEndpoint {
            base_url: non_empty(self.remote_base_url)
                .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model: non_empty(self.remote_model).unwrap_or_else(|| DEFAULT_REMOTE_MODEL.into()),
        });

        ClassifierConfig {
            local,
            remote,
            local_first: self.local_first.unwrap_or(true),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
