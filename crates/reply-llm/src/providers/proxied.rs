//! Calls the license relay, which validates the license for the calling
//! domain and forwards the prompt to Gemini with the embedded API key.

use std::time::Duration;

use async_trait::async_trait;
use reply_core::{GenerationRequest, ReplyError, Result};
use reqwest::Client;
use serde_json::Value;

use super::common::http::{decode_body, extract_error, post_json};
use crate::protocol::{BackendResponse, GenerationConfig, RelayRequest};
use crate::provider::ReplyBackend;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://deploymance.com/api/addon/ai-response";
pub const RELAY_PATH: &str = "/api/addon/ai-response";
pub const PROXIED_TIMEOUT: Duration = Duration::from_secs(60);

const SERVICE: &str = "license relay";

pub struct ProxiedBackend {
    client: Client,
    endpoint: String,
    license_key: String,
    gemini_api_key: String,
    domain: String,
}

impl ProxiedBackend {
    pub fn new(
        client: Client,
        license_key: impl Into<String>,
        gemini_api_key: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            license_key: license_key.into(),
            gemini_api_key: gemini_api_key.into(),
            domain: domain.into(),
        }
    }

    /// Point at a non-production relay. The relay path is appended.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = format!("{}{}", base_url.trim_end_matches('/'), RELAY_PATH);
        log::info!("Using custom relay URL: {}", self.endpoint);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

#[async_trait]
impl ReplyBackend for ProxiedBackend {
    fn name(&self) -> &'static str {
        "proxied"
    }

    async fn generate(&self, prompt: &str, request: &GenerationRequest) -> Result<BackendResponse> {
        let body = RelayRequest {
            license_key: self.license_key.clone(),
            domain: self.domain.clone(),
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_model: request.model.clone(),
            prompt: prompt.to_string(),
            generation_config: GenerationConfig::for_reply(request.max_output_tokens),
        };

        log::debug!(
            "Sending request to relay {} (model: {}, maxTokens: {}, domain: {})",
            self.endpoint,
            request.model,
            request.max_output_tokens,
            self.domain
        );

        let raw = post_json(&self.client, &self.endpoint, &[], &body, PROXIED_TIMEOUT, SERVICE).await?;
        let decoded = decode_body(&raw, SERVICE)?;

        if raw.status == 401 {
            let (message, _) = extract_error(&decoded);
            let reason = message.unwrap_or_else(|| "License validation failed".to_string());
            log::warn!("Relay rejected license: {}", reason);
            return Err(ReplyError::License(reason));
        }

        if raw.status != 200 {
            let (message, details) = extract_error(&decoded);
            let message = message.unwrap_or_else(|| "Unknown error".to_string());
            log::warn!(
                "Relay error: HTTP {}: {} {}",
                raw.status,
                message,
                details.as_deref().unwrap_or("")
            );
            return Err(ReplyError::protocol_with_details(message, details));
        }

        if decoded.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(ReplyError::protocol("API returned unsuccessful response"));
        }

        Ok(BackendResponse::new(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_production_relay() {
        let backend = ProxiedBackend::new(Client::new(), "LIC", "key", "billing.example.com");
        assert_eq!(backend.endpoint(), DEFAULT_RELAY_ENDPOINT);
        assert_eq!(backend.domain(), "billing.example.com");
    }

    #[test]
    fn relay_timeout_is_60_seconds() {
        assert_eq!(PROXIED_TIMEOUT, Duration::from_secs(60));
    }

    #[test]
    fn base_url_override_appends_relay_path() {
        let backend = ProxiedBackend::new(Client::new(), "LIC", "key", "example.com")
            .with_base_url("http://10.0.0.5:3001/");
        assert_eq!(backend.endpoint(), "http://10.0.0.5:3001/api/addon/ai-response");
    }
}
