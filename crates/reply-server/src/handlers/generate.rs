use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use reply_core::{ReplyError, Tone};
use reply_engine::ReplyOutcome;
use serde::Deserialize;

use crate::logging::Timer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReplyRequest {
    pub ticket_id: u64,
    #[serde(default)]
    pub admin_instructions: Option<String>,
    #[serde(default)]
    pub extra_context: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

pub fn status_for(error: &ReplyError) -> StatusCode {
    match error {
        ReplyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ReplyError::NotFound(_) => StatusCode::NOT_FOUND,
        ReplyError::License(_) => StatusCode::FORBIDDEN,
        ReplyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ReplyError::Connection(_) | ReplyError::Protocol { .. } | ReplyError::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

pub async fn handler(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<GenerateReplyRequest>,
) -> impl Responder {
    let ticket_id = req.ticket_id;
    let admin_instructions = req.admin_instructions.as_deref().map(str::trim).unwrap_or("");
    let extra_context = req.extra_context.as_deref().map(str::trim).unwrap_or("");
    let tone = Tone::parse_lossy(req.tone.as_deref().unwrap_or(""));
    let request_host = http_req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    log::info!("[ticket #{}] Reply requested (tone: {})", ticket_id, tone);
    let timer = Timer::new(format!("[ticket #{}] Reply generation", ticket_id));

    let outcome = match state.generator_for(request_host) {
        Ok(generator) => {
            generator
                .handle(ticket_id, admin_instructions, extra_context, tone)
                .await
        }
        Err(e) => {
            log::error!("[ticket #{}] {}: {}", ticket_id, e.kind(), e);
            ReplyOutcome::from_result(Err(e))
        }
    };
    timer.finish();

    let status = outcome.error().map(status_for).unwrap_or(StatusCode::OK);
    HttpResponse::build(status).json(outcome)
}
