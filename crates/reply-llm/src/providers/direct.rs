//! Calls the Gemini `generateContent` endpoint with the operator's API key.

use std::time::Duration;

use async_trait::async_trait;
use reply_core::{GenerationRequest, ReplyError, Result};
use reqwest::Client;

use super::common::http::{decode_body, extract_error, post_json};
use crate::protocol::{BackendResponse, GeminiRequest, GenerationConfig};
use crate::provider::ReplyBackend;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
pub const DIRECT_TIMEOUT: Duration = Duration::from_secs(45);

const SERVICE: &str = "Gemini API";

pub struct DirectBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DirectBackend {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (e.g., for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model_path
        )
    }
}

#[async_trait]
impl ReplyBackend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn generate(&self, prompt: &str, request: &GenerationRequest) -> Result<BackendResponse> {
        let url = self.endpoint(&request.model);
        let body = GeminiRequest::from_prompt(
            prompt,
            GenerationConfig::for_reply(request.max_output_tokens),
        );

        log::debug!(
            "Sending request to {} (model: {}, maxTokens: {})",
            url,
            request.model,
            request.max_output_tokens
        );

        let raw = post_json(
            &self.client,
            &url,
            &[("key", self.api_key.as_str())],
            &body,
            DIRECT_TIMEOUT,
            SERVICE,
        )
        .await?;
        let decoded = decode_body(&raw, SERVICE)?;

        if raw.status != 200 {
            let (message, details) = extract_error(&decoded);
            let message = message
                .unwrap_or_else(|| format!("Gemini API returned HTTP {}", raw.status));
            log::warn!(
                "Gemini API error: HTTP {}: {} {}",
                raw.status,
                message,
                details.as_deref().unwrap_or("")
            );
            return Err(ReplyError::protocol_with_details(message, details));
        }

        Ok(BackendResponse::new(decoded))
    }
}
