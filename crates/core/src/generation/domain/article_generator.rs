use serde::{Deserialize, Serialize};

use super::tone::Tone;

/// A successfully generated article plus provider metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub blog_post: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    pub model: String,
    pub tone: Tone,
    /// The transcript exceeded the token budget and its tail was dropped.
    #[serde(default)]
    pub truncated: bool,
}

/// Result of one generation call, tagged by `status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationOutcome {
    Success(Article),
    Error { message: String },
}

impl GenerationOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        GenerationOutcome::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }
}

/// Domain interface for tone-conditioned article generation.
///
/// Implementations never panic or return `Err`; provider failures are
/// reported as `GenerationOutcome::Error` so callers must handle them.
pub trait ArticleGenerator: Send + Sync {
    fn generate(&self, transcript: &str, tone: Tone) -> GenerationOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_with_status_tag() {
        let outcome = GenerationOutcome::Success(Article {
            blog_post: "# Title".to_string(),
            tokens_used: Some(42),
            model: "gpt-3.5-turbo".to_string(),
            tone: Tone::Casual,
            truncated: false,
        });
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["blog_post"], "# Title");
        assert_eq!(value["tone"], "casual");
    }

    #[test]
    fn test_error_deserializes_from_status_tag() {
        let outcome: GenerationOutcome =
            serde_json::from_str(r#"{"status":"error","message":"quota exceeded"}"#).unwrap();
        assert_eq!(outcome, GenerationOutcome::failure("quota exceeded"));
        assert!(!outcome.is_success());
    }
}
