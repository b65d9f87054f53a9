//! The [`ClassifierBackend`] trait and the prompt contract shared by every backend.

use async_trait::async_trait;
use triage_core::{BackendInvocation, BackendKind};

use crate::BackendError;

/// Characters of input text forwarded to a backend.
pub const MAX_INPUT_CHARS: usize = 4000;

/// Sampling temperature requested from every backend.
pub const TEMPERATURE: f64 = 0.7;

/// Response token budget requested from every backend.
pub const MAX_TOKENS: u32 = 1000;

pub const SYSTEM_PROMPT: &str = "\
You are a transcript classifier. Analyze the provided text and return ONLY valid JSON with this exact structure:
{
    \"tags\": [\"tag1\", \"tag2\", \"tag3\"],
    \"summary\": \"A comprehensive summary of 150-200 words...\",
    \"confidence\": 0.85
}

Requirements:
- tags: Array of 3-7 descriptive labels/categories
- summary: Detailed summary between 150-200 words
- confidence: Float between 0.0 and 1.0 indicating classification confidence
- Return ONLY the JSON, no additional text or markdown formatting";

/// Build the user turn: a fixed lead-in plus the first [`MAX_INPUT_CHARS`] characters of `text`.
pub fn user_prompt(text: &str) -> String {
    let truncated = match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    };
    format!("Classify this transcript:\n\n{truncated}")
}

/// A source of classifications.
///
/// Implementations send one request per call, pass the reply through
/// [`extract_classification`](crate::extract_classification), and never retry
/// or fall back on their own; that belongs to
/// [`FallbackController`](crate::FallbackController). They hold no
/// per-request state and are shared across concurrent calls.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Model identifier reported alongside results.
    fn model(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<BackendInvocation, BackendError>;
}

/// Turn a non-2xx reply into [`BackendError::Server`].
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Server {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_untouched() {
        assert_eq!(user_prompt("hello"), "Classify this transcript:\n\nhello");
    }

    #[test]
    fn long_text_truncated_to_limit() {
        let text = "a".repeat(MAX_INPUT_CHARS + 500);
        let prompt = user_prompt(&text);
        let body = prompt.strip_prefix("Classify this transcript:\n\n").unwrap();
        assert_eq!(body.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multi-byte characters: slicing by bytes would panic.
        let text = "é".repeat(MAX_INPUT_CHARS + 1);
        let prompt = user_prompt(&text);
        let body = prompt.strip_prefix("Classify this transcript:\n\n").unwrap();
        assert_eq!(body.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn exact_limit_untouched() {
        let text = "b".repeat(MAX_INPUT_CHARS);
        assert!(user_prompt(&text).ends_with(&text));
    }
}
