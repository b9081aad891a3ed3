//! Gemini wire format.
//!
//! Requests carry a single user turn:
//! ```json
//! {
//!   "contents": [{"parts": [{"text": "..."}]}],
//!   "generationConfig": {"temperature": 0.7, "maxOutputTokens": 4096, "topK": 40, "topP": 0.95}
//! }
//! ```
//! Responses are kept as raw JSON behind [`BackendResponse`] so that a
//! missing candidate can be told apart from an unparseable body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FINISH_REASON_STOP: &str = "STOP";
pub const FINISH_REASON_MAX_TOKENS: &str = "MAX_TOKENS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f64,
}

impl GenerationConfig {
    pub fn for_reply(max_output_tokens: u32) -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

impl GeminiRequest {
    pub fn from_prompt(prompt: &str, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiPart {
    pub text: String,
}

/// Body sent to the license relay, which forwards it to Gemini.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub license_key: String,
    pub domain: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub prompt: String,
    pub generation_config: GenerationConfig,
}

/// Raw backend reply in Gemini's `candidates` schema.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    raw: Value,
}

impl BackendResponse {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Text of the first part of the first candidate.
    pub fn candidate_text(&self) -> Option<&str> {
        self.raw
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.raw
            .pointer("/candidates/0/finishReason")
            .and_then(Value::as_str)
    }

    pub fn is_truncated(&self) -> bool {
        self.finish_reason() == Some(FINISH_REASON_MAX_TOKENS)
    }
}
