//! Tolerant extraction of a classification object from raw model output.
//!
//! Models are asked for bare JSON but often wrap it in a markdown fence or add
//! prose around it. The extractor recovers the object and fills absent fields
//! with fixed defaults so nothing downstream has to branch on them.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::Error as _;
use serde_json::Value;
use triage_core::ClassificationResult;

use crate::MalformedResponse;

/// Confidence assumed when the model omits it.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// First fenced block (optionally tagged `json`) containing a brace-delimited object.
static FENCED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"));
static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A```(?:json)?\s*").expect("valid regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\z").expect("valid regex"));

/// Recover a [`ClassificationResult`] from a model's raw text reply.
///
/// Fails only when the normalized text is not a decodable JSON object. Fields
/// are read leniently: `confidence` may be a number or a numeric string, and
/// non-string entries of `tags` are dropped. A field that is absent, null, or
/// unusable takes its default (`[]`, `""`, [`DEFAULT_CONFIDENCE`]).
pub fn extract_classification(raw: &str) -> Result<ClassificationResult, MalformedResponse> {
    let candidate = normalize(raw);

    let value: Value =
        serde_json::from_str(&candidate).map_err(|source| MalformedResponse { source })?;
    let Value::Object(fields) = value else {
        return Err(MalformedResponse {
            source: serde_json::Error::custom("expected a JSON object"),
        });
    };

    let tags = match fields.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    };
    let summary = fields
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let confidence = fields
        .get("confidence")
        .and_then(confidence_of)
        .unwrap_or(DEFAULT_CONFIDENCE);

    Ok(ClassificationResult::new(tags, summary, confidence))
}

fn confidence_of(value: &Value) -> Option<f64> {
    let confidence = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    confidence.is_finite().then_some(confidence)
}

/// Strip surrounding whitespace and markdown fences, preferring the first fenced object.
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    let body = FENCED_OBJECT
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str());

    let body = LEADING_FENCE.replace(body, "");
    TRAILING_FENCE.replace(&body, "").into_owned()
}
