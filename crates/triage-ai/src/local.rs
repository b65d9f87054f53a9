//! Backend for a self-hosted OpenAI-compatible inference server (vLLM, llama.cpp, Ollama).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_core::{BackendInvocation, BackendKind, LocalEndpoint};

use crate::backend::{
    ClassifierBackend, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, ensure_success, user_prompt,
};
use crate::{BackendError, extract_classification};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Classifies via `POST {base_url}/chat/completions`.
pub struct LocalBackend {
    http: reqwest::Client,
    endpoint: LocalEndpoint,
}

impl LocalBackend {
    pub fn new(endpoint: LocalEndpoint, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ClassifierBackend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn model(&self) -> &str {
        &self.endpoint.model
    }

    async fn classify(&self, text: &str) -> Result<BackendInvocation, BackendError> {
        let prompt = user_prompt(text);
        let request = ChatRequest {
            model: &self.endpoint.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = self.completions_url();
        debug!(url = %url, model = %self.endpoint.model, "sending local classification request");
        let response = self.http.post(&url).json(&request).send().await?;
        let response = ensure_success(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Envelope(format!("failed to parse response: {e}")))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| BackendError::Envelope("no message content in choices".into()))?;

        let result = extract_classification(&content)?;
        debug!(
            model = %self.endpoint.model,
            confidence = result.confidence,
            tags = result.tags.len(),
            "local classification received"
        );
        Ok(BackendInvocation {
            result,
            model: self.endpoint.model.clone(),
        })
    }
}

impl std::fmt::Debug for LocalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalBackend")
            .field("base_url", &self.endpoint.base_url)
            .field("model", &self.endpoint.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> LocalBackend {
        LocalBackend::new(
            LocalEndpoint {
                base_url: base_url.into(),
                model: "qwen-test".into(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn completions_url_construction() {
        assert_eq!(
            backend("http://vllm:8000/v1").completions_url(),
            "http://vllm:8000/v1/chat/completions"
        );
    }

    #[test]
    fn completions_url_strips_trailing_slash() {
        assert_eq!(
            backend("http://vllm:8000/v1/").completions_url(),
            "http://vllm:8000/v1/chat/completions"
        );
    }

    #[test]
    fn reports_kind_and_model() {
        let b = backend("http://localhost");
        assert_eq!(b.kind(), BackendKind::Local);
        assert_eq!(b.model(), "qwen-test");
    }

    #[test]
    fn request_body_shape() {
        let req = ChatRequest {
            model: "m",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["max_tokens"], 1000);
    }
}
