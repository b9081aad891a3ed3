use actix_web::{web, HttpResponse, Responder};
use reply_llm::AVAILABLE_BACKENDS;
use serde::Serialize;

use crate::state::AppState;

/// Reports whether credentials are present, never their values.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub backend: &'static str,
    pub available_backends: &'static [&'static str],
    pub license_key_configured: bool,
    pub gemini_api_key_configured: bool,
    pub model: String,
    pub response_language: String,
    pub max_output_tokens: u32,
    pub max_instructions_chars: usize,
    pub max_context_chars: usize,
}

pub async fn handler(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;
    HttpResponse::Ok().json(StatusResponse {
        backend: config.backend.as_str(),
        available_backends: AVAILABLE_BACKENDS,
        license_key_configured: config.require_license_key().is_ok(),
        gemini_api_key_configured: config.require_gemini_api_key().is_ok(),
        model: config.model().to_string(),
        response_language: config.response_language.as_str().to_string(),
        max_output_tokens: config.max_output_tokens,
        max_instructions_chars: config.max_instructions_chars,
        max_context_chars: config.max_context_chars,
    })
}
