use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer};
use reply_core::ReplyError;
use reply_engine::ReplyOutcome;
use std::io;

use crate::handlers;
use crate::state::AppState;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api/v1")
            .route("/generate_reply", web::post().to(handlers::generate::handler))
            .route("/status", web::get().to(handlers::status::handler))
            .route("/health", web::get().to(handlers::health::handler)),
    );
}

// Malformed bodies still answer with the `{success, message}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        let outcome = ReplyOutcome::from_result(Err(ReplyError::InvalidRequest(format!(
            "Invalid request body: {}",
            err
        ))));
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(outcome)).into()
    })
}

pub async fn run_server(port: u16, state: AppState) -> io::Result<()> {
    log::info!(
        "Starting reply server on port {} (backend: {}, model: {})",
        port,
        state.config.backend.as_str(),
        state.config.model()
    );
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
