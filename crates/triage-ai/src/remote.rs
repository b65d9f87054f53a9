//! Backend for the hosted Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_core::{BackendInvocation, BackendKind, RemoteEndpoint};

use crate::backend::{
    ClassifierBackend, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, ensure_success, user_prompt,
};
use crate::{BackendError, extract_classification};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Classifies via `POST {base_url}/v1/messages`.
pub struct RemoteBackend {
    http: reqwest::Client,
    endpoint: RemoteEndpoint,
}

impl RemoteBackend {
    pub fn new(endpoint: RemoteEndpoint, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.endpoint.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ClassifierBackend for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn model(&self) -> &str {
        &self.endpoint.model
    }

    async fn classify(&self, text: &str) -> Result<BackendInvocation, BackendError> {
        let prompt = user_prompt(text);
        let request = MessagesRequest {
            model: &self.endpoint.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: SYSTEM_PROMPT,
            messages: [UserMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let url = self.messages_url();
        debug!(url = %url, model = %self.endpoint.model, "sending remote classification request");
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Envelope(format!("failed to parse response: {e}")))?;
        let content = body
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| BackendError::Envelope("no text block in content".into()))?;

        let result = extract_classification(&content)?;
        debug!(
            model = %self.endpoint.model,
            confidence = result.confidence,
            tags = result.tags.len(),
            "remote classification received"
        );
        Ok(BackendInvocation {
            result,
            model: self.endpoint.model.clone(),
        })
    }
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("base_url", &self.endpoint.base_url)
            .field("model", &self.endpoint.model)
            .field("api_key", &"***")
            .finish()
    }
}
