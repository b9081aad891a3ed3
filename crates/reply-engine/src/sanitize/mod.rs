//! Turns a raw backend payload into a reply an operator can send.

mod transforms;

pub use transforms::{clean_text, TextTransform, CLEANING_PIPELINE};

use reply_core::{ReplyError, Result};
use reply_llm::BackendResponse;

pub const TRUNCATION_NOTE: &str =
    "\n\n[Note: Response may have been truncated. Please review and complete if needed.]";

#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedReply {
    pub text: String,
    pub truncated: bool,
    pub raw_length: usize,
}

/// Extracts the first candidate's text, cleans it and appends the
/// truncation note when the model stopped on its token limit.
pub fn extract_and_clean(response: &BackendResponse) -> Result<SanitizedReply> {
    let raw = response
        .candidate_text()
        .ok_or_else(|| ReplyError::Parse("Invalid response structure from API".to_string()))?;

    let mut text = clean_text(raw);
    if text.is_empty() {
        return Err(ReplyError::Parse(
            "The API returned an empty reply after cleaning".to_string(),
        ));
    }

    let truncated = response.is_truncated();
    if truncated {
        text.push_str(TRUNCATION_NOTE);
    }

    Ok(SanitizedReply {
        text,
        truncated,
        raw_length: raw.chars().count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reply_llm::FINISH_REASON_STOP;
    use serde_json::json;

    fn response(text: &str, finish_reason: &str) -> BackendResponse {
        BackendResponse::new(json!({
            "candidates": [{
                "content": {"parts": [{"text": text}]},
                "finishReason": finish_reason
            }]
        }))
    }

    #[test]
    fn cleans_signature_from_reply() {
        let reply = extract_and_clean(&response(
            "Your issue is resolved.\n\nBest regards,\nSupport Team",
            FINISH_REASON_STOP,
        ))
        .expect("clean reply");
        assert_eq!(reply.text, "Your issue is resolved.");
        assert!(!reply.truncated);
    }

    #[test]
    fn max_tokens_appends_note_once_at_end() {
        let reply = extract_and_clean(&response("Step one is", "MAX_TOKENS")).expect("clean reply");
        assert!(reply.truncated);
        assert!(reply.text.ends_with(TRUNCATION_NOTE));
        assert_eq!(reply.text.matches("[Note: Response may have been truncated").count(), 1);
    }

    #[test]
    fn other_finish_reasons_add_no_note() {
        for reason in [FINISH_REASON_STOP, "SAFETY", ""] {
            let reply = extract_and_clean(&response("Hello", reason)).expect("clean reply");
            assert_eq!(reply.text, "Hello");
        }
    }

    #[test]
    fn missing_text_is_a_parse_error() {
        let err = extract_and_clean(&BackendResponse::new(json!({"candidates": []}))).unwrap_err();
        assert_eq!(
            err,
            ReplyError::Parse("Invalid response structure from API".to_string())
        );
    }

    #[test]
    fn reply_that_cleans_to_nothing_is_a_parse_error() {
        let err = extract_and_clean(&response("\n\nRegards,\n[Your Name]\n", "MAX_TOKENS"))
            .unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }
}
