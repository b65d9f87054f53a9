//! Classification results and the outcome returned to callers.

use serde::{Deserialize, Serialize};

/// Upper bound on tags exposed to callers.
pub const MAX_TAGS: usize = 7;

/// Tag substituted when a backend produced none.
pub const PLACEHOLDER_TAG: &str = "uncategorized";

/// Model name reported for the degraded responder.
pub const HEURISTIC_MODEL: &str = "heuristic";

/// One of the two configured classification backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Self-hosted OpenAI-compatible inference endpoint.
    Local,
    /// Hosted model provider.
    Remote,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What produced the final result of an orchestration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    Local,
    Remote,
    /// Degraded responder: no backend was consulted successfully.
    Heuristic,
}

impl From<BackendKind> for Producer {
    fn from(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Local => Self::Local,
            BackendKind::Remote => Self::Remote,
        }
    }
}

/// Tags, summary, and confidence for a block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub tags: Vec<String>,
    pub summary: String,
    /// Always within `[0.0, 1.0]` when built through [`ClassificationResult::new`].
    pub confidence: f64,
}

impl ClassificationResult {
    /// Build a result, clamping `confidence` into `[0.0, 1.0]`.
    ///
    /// Non-finite confidence (NaN, ±inf) becomes `0.0`.
    pub fn new(tags: Vec<String>, summary: impl Into<String>, confidence: f64) -> Self {
        Self {
            tags,
            summary: summary.into(),
            confidence: clamp_confidence(confidence),
        }
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A result as returned by one backend, tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendInvocation {
    pub result: ClassificationResult,
    pub model: String,
}

/// The final answer for one classification call.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationOutcome {
    pub result: ClassificationResult,
    /// Model identifier, or `"heuristic"` for the degraded responder.
    pub model: String,
    pub producer: Producer,
    /// True when the first strategy attempted did not produce this result.
    pub fallback_used: bool,
}

impl OrchestrationOutcome {
    /// Outcome attributed to a backend.
    pub fn from_backend(
        kind: BackendKind,
        invocation: BackendInvocation,
        fallback_used: bool,
    ) -> Self {
        Self {
            result: enforce_bounds(invocation.result),
            model: invocation.model,
            producer: kind.into(),
            fallback_used,
        }
    }

    /// Outcome attributed to the degraded responder. Always counts as a fallback.
    pub fn heuristic(result: ClassificationResult) -> Self {
        Self {
            result: enforce_bounds(result),
            model: HEURISTIC_MODEL.to_string(),
            producer: Producer::Heuristic,
            fallback_used: true,
        }
    }
}

fn enforce_bounds(mut result: ClassificationResult) -> ClassificationResult {
    result.tags.truncate(MAX_TAGS);
    if result.tags.is_empty() {
        result.tags.push(PLACEHOLDER_TAG.to_string());
    }
    result.confidence = clamp_confidence(result.confidence);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tag{i}")).collect()
    }

    #[test]
    fn confidence_clamped_high() {
        assert_eq!(ClassificationResult::new(vec![], "", 1.7).confidence, 1.0);
    }

    #[test]
    fn confidence_clamped_low() {
        assert_eq!(ClassificationResult::new(vec![], "", -0.2).confidence, 0.0);
    }

    #[test]
    fn confidence_nan_becomes_zero() {
        assert_eq!(
            ClassificationResult::new(vec![], "", f64::NAN).confidence,
            0.0
        );
    }

    #[test]
    fn outcome_truncates_to_seven_tags() {
        let inv = BackendInvocation {
            result: ClassificationResult::new(tags(10), "s", 0.9),
            model: "m".into(),
        };
        let outcome = OrchestrationOutcome::from_backend(BackendKind::Local, inv, false);
        assert_eq!(outcome.result.tags.len(), MAX_TAGS);
        assert_eq!(outcome.result.tags[0], "tag0");
        assert_eq!(outcome.result.tags[6], "tag6");
    }

    #[test]
    fn outcome_fills_empty_tags() {
        let inv = BackendInvocation {
            result: ClassificationResult::new(vec![], "s", 0.9),
            model: "m".into(),
        };
        let outcome = OrchestrationOutcome::from_backend(BackendKind::Remote, inv, true);
        assert_eq!(outcome.result.tags, vec![PLACEHOLDER_TAG.to_string()]);
        assert_eq!(outcome.producer, Producer::Remote);
        assert!(outcome.fallback_used);
    }

    #[test]
    fn outcome_reclamps_hand_built_result() {
        let inv = BackendInvocation {
            result: ClassificationResult {
                tags: tags(3),
                summary: String::new(),
                confidence: 3.0,
            },
            model: "m".into(),
        };
        let outcome = OrchestrationOutcome::from_backend(BackendKind::Local, inv, false);
        assert_eq!(outcome.result.confidence, 1.0);
    }

    #[test]
    fn heuristic_outcome_is_fallback() {
        let outcome = OrchestrationOutcome::heuristic(ClassificationResult::new(tags(4), "s", 0.3));
        assert_eq!(outcome.model, HEURISTIC_MODEL);
        assert_eq!(outcome.producer, Producer::Heuristic);
        assert!(outcome.fallback_used);
    }

    #[test]
    fn backend_kind_display() {
        assert_eq!(BackendKind::Local.to_string(), "local");
        assert_eq!(BackendKind::Remote.as_str(), "remote");
    }
}
